use super::galois::G;

// Reed-Solomon encoder
//------------------------------------------------------------------------------

/// Coefficients of prod(x - alpha^i) for i in 0..n, leading term first.
pub fn generator_polynomial(n: usize) -> Vec<G> {
    let mut gen = Vec::with_capacity(n + 1);
    gen.push(G::ONE);
    for i in 0..n {
        gen.push(G::ZERO);
        let root = G::gen_pow(i);
        for j in (1..gen.len()).rev() {
            let prev = gen[j - 1];
            gen[j] += prev * root;
        }
    }
    gen
}

/// Remainder of data * x^n divided by the generator polynomial, computed with
/// a shift register of n codewords.
pub fn reed_solomon_encode(data: &[u8], n: usize) -> Vec<u8> {
    let gen = generator_polynomial(n);
    let mut rem = vec![G::ZERO; n];
    for &b in data {
        let coef = G(b) + rem.first().copied().unwrap_or_default();
        rem.rotate_left(1);
        if let Some(last) = rem.last_mut() {
            *last = G::ZERO;
        }
        for (r, g) in rem.iter_mut().zip(&gen[1..]) {
            *r += coef * *g;
        }
    }
    rem.into_iter().map(|g| g.0).collect()
}
