mod qr;
mod render;

pub use qr::{Module, QR};
pub use render::{ModuleMatrix, QUIET_ZONE};

use tracing::{debug, info};

use crate::common::{
    codec::{detect_best_mode, encode, Mode},
    ec::implement_error_correction,
    error::{QRError, QRResult},
    mask::{apply_best_mask, MaskPattern},
    metadata::{ECLevel, Version},
};

/// Symbol parameters for [`crate::generate`]. Defaults to version 4, level L
/// and an auto-detected mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerateOptions {
    pub version: Version,
    pub ec_level: ECLevel,
    pub mode: Option<Mode>,
}

pub struct QRBuilder<'a> {
    text: &'a str,
    version: Version,
    ec_level: ECLevel,
    mode: Option<Mode>,
    mask: Option<MaskPattern>,
}

impl<'a> QRBuilder<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            version: Version::default(),
            ec_level: ECLevel::default(),
            mode: None,
            mask: None,
        }
    }

    pub fn version(&mut self, version: Version) -> &mut Self {
        self.version = version;
        self
    }

    pub fn ec_level(&mut self, ec_level: ECLevel) -> &mut Self {
        self.ec_level = ec_level;
        self
    }

    pub fn mode(&mut self, mode: Mode) -> &mut Self {
        self.mode = Some(mode);
        self
    }

    pub fn unset_mode(&mut self) -> &mut Self {
        self.mode = None;
        self
    }

    pub fn mask(&mut self, mask: MaskPattern) -> &mut Self {
        self.mask = Some(mask);
        self
    }

    pub fn options(&mut self, opts: &GenerateOptions) -> &mut Self {
        self.version = opts.version;
        self.ec_level = opts.ec_level;
        self.mode = opts.mode;
        self
    }

    pub fn metadata(&self) -> String {
        match self.mode {
            Some(m) => format!(
                "{{ Version: {}, Ec level: {:?}, Mode: {:?} }}",
                self.version, self.ec_level, m
            ),
            None => format!(
                "{{ Version: {}, Ec level: {:?}, Mode: Auto }}",
                self.version, self.ec_level
            ),
        }
    }
}


impl QRBuilder<'_> {
    pub fn build(&self) -> QRResult<QR> {
        let mut qr = self.build_unmasked()?;

        let mask = match self.mask {
            Some(m) => {
                debug!(mask = *m, "Applying requested mask");
                qr.apply_mask(m);
                m
            }
            None => {
                debug!("Finding & applying best mask");
                apply_best_mask(&mut qr)
            }
        };

        let total_modules = qr.width() * qr.width();
        let dark_modules = qr.count_dark_modules();
        info!(
            version = *self.version,
            ec_level = ?self.ec_level,
            mask = *mask,
            data_capacity = self.version.data_capacity(self.ec_level),
            dark_modules,
            light_modules = total_modules - dark_modules,
            balance = dark_modules * 100 / total_modules,
            "QR generated"
        );

        Ok(qr)
    }

    /// Everything up to, but excluding, masking and the final format info.
    pub(crate) fn build_unmasked(&self) -> QRResult<QR> {
        debug!("Generating QR {}", self.metadata());
        if self.text.is_empty() {
            return Err(QRError::InvalidInput("empty data"));
        }

        let (ver, ecl) = (self.version, self.ec_level);
        let mode = self.mode.unwrap_or_else(|| detect_best_mode(self.text));

        debug!(?mode, "Encoding data");
        let encoded = encode(self.text, ver, ecl, mode)?;

        debug!("Constructing payload with ecc & interleaving");
        let payload = implement_error_correction(&encoded, ver, ecl)?;

        debug!("Drawing functional patterns & encoding region");
        let mut qr = QR::new(ver, ecl);
        qr.draw_all_function_patterns();
        qr.draw_encoding_region(&payload);

        Ok(qr)
    }
}
