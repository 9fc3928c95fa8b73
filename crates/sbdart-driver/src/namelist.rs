//! Fortran namelist rendering for the SBDART `INPUT` file.
//!
//! SBDART reads a single `&INPUT ... /` namelist group from a file named
//! `INPUT` in its working directory. Only non-default parameters need to be
//! written; everything else falls back to the program's own defaults.

use lut_common::ParameterSet;

/// Name of the input file SBDART expects in its working directory.
pub const INPUT_FILE: &str = "INPUT";

/// Render a parameter set as an `&INPUT` namelist group.
pub fn render(params: &ParameterSet) -> String {
    let mut out = String::from(" &INPUT\n");
    for (name, value) in params.iter() {
        out.push_str("  ");
        out.push_str(name);
        out.push('=');
        out.push_str(&value.render());
        out.push_str(",\n");
    }
    out.push_str(" /\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use lut_common::ParamValue;

    #[test]
    fn test_render_group_delimiters() {
        let params = ParameterSet::new().with("sza", 20.0);
        let text = render(&params);
        assert!(text.starts_with(" &INPUT\n"));
        assert!(text.ends_with(" /\n"));
        assert!(text.contains("  sza=20.0,\n"));
    }

    #[test]
    fn test_render_value_kinds() {
        let params = ParameterSet::new()
            .with("idatm", 4i64)
            .with("albcon", 0.33)
            .with("zcloud", "5*0.0")
            .with("wlbaer", ParamValue::Floats(vec![0.42, 0.64, 0.86]));
        let text = render(&params);

        assert!(text.contains("  idatm=4,\n"));
        assert!(text.contains("  albcon=0.33,\n"));
        assert!(text.contains("  zcloud=5*0.0,\n"));
        assert!(text.contains("  wlbaer=0.42,0.64,0.86,\n"));
    }

    #[test]
    fn test_render_is_deterministic() {
        let params = ParameterSet::new().with("sza", 1.0).with("idatm", 2i64);
        assert_eq!(render(&params), render(&params));
        // Entries come out name-ordered regardless of insertion order.
        let reordered = ParameterSet::new().with("idatm", 2i64).with("sza", 1.0);
        assert_eq!(render(&params), render(&reordered));
    }
}
