//! Canned SBDART stdout payloads.

/// An IOUT=1 spectral flux payload with `nw` wavelength rows.
///
/// Columns: wl ffv topdn topup topdir botdn botup botdir. The flux values
/// are a simple deterministic function of the row so tests can assert
/// placement.
pub fn spectral_flux_output(nw: usize) -> String {
    let mut out = String::new();
    for i in 0..nw {
        let wl = 0.2 + 0.02 * i as f64;
        let base = 10.0 + i as f64;
        out.push_str(&format!(
            "  {:.3}  1.000  {:.2}  {:.2}  {:.2}  {:.2}  {:.2}  {:.2}\n",
            wl,
            base,
            base + 0.1,
            base + 0.2,
            base + 0.3,
            base + 0.4,
            base + 0.5,
        ));
    }
    out
}

/// An IOUT=10 integrated flux payload with all six channels set to `value`.
pub fn integrated_flux_output(value: f64) -> String {
    format!(
        "   0.200   5.000   4.800  {v:.3}  {v:.3}  {v:.3}  {v:.3}  {v:.3}  {v:.3}\n",
        v = value
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spectral_fixture_row_count() {
        let text = spectral_flux_output(4);
        assert_eq!(text.lines().count(), 4);
        assert_eq!(text.lines().next().unwrap().split_whitespace().count(), 8);
    }

    #[test]
    fn test_integrated_fixture_columns() {
        let text = integrated_flux_output(1.0);
        assert_eq!(text.split_whitespace().count(), 9);
    }
}
