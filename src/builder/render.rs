use image::{GrayImage, Luma};

/// Width of the light border added around every symbol, in modules.
pub const QUIET_ZONE: usize = 4;

/// Finished symbol including its quiet zone. Each module is 1 (dark) or
/// 0 (light), stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleMatrix {
    w: usize,
    modules: Vec<u8>,
}

impl ModuleMatrix {
    pub(crate) fn with_quiet_zone(symbol_w: usize, modules: impl Iterator<Item = bool>) -> Self {
        let w = symbol_w + 2 * QUIET_ZONE;
        let mut res = vec![0u8; w * w];
        for (i, dark) in modules.enumerate() {
            let (r, c) = (i / symbol_w + QUIET_ZONE, i % symbol_w + QUIET_ZONE);
            res[r * w + c] = dark as u8;
        }
        Self { w, modules: res }
    }

    pub fn width(&self) -> usize {
        self.w
    }

    pub fn get(&self, r: usize, c: usize) -> u8 {
        self.modules[r * self.w + c]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.modules.chunks_exact(self.w)
    }

    pub fn modules(&self) -> &[u8] {
        &self.modules
    }
}

// Render
//------------------------------------------------------------------------------

impl ModuleMatrix {
    /// Rasterizes with `module_sz` pixels per module, dark as 0 and light as 255.
    pub fn to_image(&self, module_sz: u32) -> GrayImage {
        let total_sz = self.w as u32 * module_sz;
        GrayImage::from_fn(total_sz, total_sz, |x, y| {
            let (r, c) = ((y / module_sz) as usize, (x / module_sz) as usize);
            match self.get(r, c) {
                1 => Luma([0]),
                _ => Luma([255]),
            }
        })
    }

    /// Two characters per module so the symbol keeps its aspect ratio in a
    /// terminal. Light modules are drawn as full blocks.
    pub fn to_str(&self) -> String {
        let mut canvas = String::with_capacity(self.w * (self.w * 2 + 1));
        for row in self.rows() {
            for &m in row {
                canvas.push_str(if m == 1 { "  " } else { "██" });
            }
            canvas.push('\n');
        }
        canvas
    }
}
