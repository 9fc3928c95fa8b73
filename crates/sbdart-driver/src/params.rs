//! The whitelisted SBDART parameter table.
//!
//! Every namelist key SBDART accepts, with its default value and a one-line
//! description. The sweep engine validates axis labels and baseline
//! overrides against this table before any invocation is attempted.

use lut_common::{ParamValue, ParameterSet};

/// Default value of one parameter, in const-friendly form.
#[derive(Debug, Clone, Copy)]
pub enum DefaultValue {
    Int(i64),
    Float(f64),
    /// Raw Fortran token: logicals (`t`/`f`), repeat fills (`5*0.0`),
    /// or comma-joined tuples.
    Text(&'static str),
}

impl DefaultValue {
    fn to_param(self) -> ParamValue {
        match self {
            DefaultValue::Int(v) => ParamValue::Int(v),
            DefaultValue::Float(v) => ParamValue::Float(v),
            DefaultValue::Text(v) => ParamValue::Text(v.to_string()),
        }
    }
}

impl std::fmt::Display for DefaultValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_param().render())
    }
}

/// One whitelisted parameter.
#[derive(Debug, Clone, Copy)]
pub struct ParamSpec {
    pub name: &'static str,
    pub default: DefaultValue,
    pub description: &'static str,
}

use DefaultValue::{Float as F, Int as I, Text as T};

/// The full SBDART input surface.
pub const PARAMETERS: &[ParamSpec] = &[
    ParamSpec { name: "idatm", default: I(4), description: "Atmospheric profile ID" },
    ParamSpec { name: "amix", default: F(0.0), description: "Mixing factor between custom (atms.dat) and selected idatm profile" },
    ParamSpec { name: "isat", default: I(0), description: "Spectral response (filter) function ID" },
    ParamSpec { name: "wlinf", default: F(0.550), description: "Lower wavelength limit in um" },
    ParamSpec { name: "wlsup", default: F(0.550), description: "Upper wavelength limit in um" },
    ParamSpec { name: "wlinc", default: F(0.0), description: "Spectral resolution" },
    ParamSpec { name: "sza", default: F(0.0), description: "Solar zenith angle in deg" },
    ParamSpec { name: "csza", default: F(-1.0), description: "Cosine of solar zenith angle" },
    ParamSpec { name: "solfac", default: F(1.0), description: "Solar distance factor" },
    ParamSpec { name: "nf", default: I(2), description: "Solar spectrum ID" },
    ParamSpec { name: "iday", default: I(0), description: "Day of year (for SZA calculation)" },
    ParamSpec { name: "time", default: F(16.0), description: "UTC time in decimal hours" },
    ParamSpec { name: "alat", default: F(-64.767), description: "Latitude of point on Earth's surface" },
    ParamSpec { name: "alon", default: F(-64.067), description: "Longitude of point on Earth's surface" },
    ParamSpec { name: "zpres", default: F(-1.0), description: "Surface altitude in km; alternative to PBAR" },
    ParamSpec { name: "pbar", default: F(-1.0), description: "Surface pressure in mb (negative uses profile)" },
    ParamSpec { name: "sclh2o", default: F(-1.0), description: "Water vapor scale height (km)" },
    ParamSpec { name: "uw", default: F(-1.0), description: "Integrated water vapor (g/cm^2)" },
    ParamSpec { name: "uo3", default: F(-1.0), description: "Integrated ozone concentration (atm-cm)" },
    ParamSpec { name: "o3trp", default: F(-1.0), description: "Integrated tropospheric ozone concentration (atm-cm)" },
    ParamSpec { name: "ztrp", default: F(0.0), description: "Tropopause altitude" },
    ParamSpec { name: "xrsc", default: F(1.0), description: "Rayleigh scattering sensitivity" },
    ParamSpec { name: "xn2", default: F(-1.0), description: "N2 volume mixing ratio (ppm)" },
    ParamSpec { name: "xo2", default: F(-1.0), description: "O2 volume mixing ratio (ppm)" },
    ParamSpec { name: "xco2", default: F(-1.0), description: "CO2 volume mixing ratio (ppm)" },
    ParamSpec { name: "xch4", default: F(-1.0), description: "CH4 volume mixing ratio (ppm)" },
    ParamSpec { name: "xn2o", default: F(-1.0), description: "N2O volume mixing ratio (ppm)" },
    ParamSpec { name: "xco", default: F(-1.0), description: "CO volume mixing ratio (ppm)" },
    ParamSpec { name: "xno2", default: F(-1.0), description: "NO2 volume mixing ratio (ppm)" },
    ParamSpec { name: "xso2", default: F(-1.0), description: "SO2 volume mixing ratio (ppm)" },
    ParamSpec { name: "xnh3", default: F(-1.0), description: "NH3 volume mixing ratio (ppm)" },
    ParamSpec { name: "xno", default: F(-1.0), description: "NO volume mixing ratio (ppm)" },
    ParamSpec { name: "xhno3", default: F(-1.0), description: "HNO3 volume mixing ratio (ppm)" },
    ParamSpec { name: "xo4", default: F(1.0), description: "Oxygen collisional complex absorption sensitivity" },
    ParamSpec { name: "isalb", default: I(0), description: "Surface albedo feature ID" },
    ParamSpec { name: "albcon", default: F(0.0), description: "Spectrally-uniform surface albedo" },
    ParamSpec { name: "sc", default: T("1.0,3*0.0"), description: "Surface albedo params for ISALB in {7,8,10}" },
    ParamSpec { name: "zcloud", default: T("5*0.0"), description: "Cloud layer altitude in km (up to 5 values)" },
    ParamSpec { name: "tcloud", default: T("5*0.0"), description: "Cloud optical depth at 0.55um" },
    ParamSpec { name: "lwp", default: T("5*0.0"), description: "Liquid water path (g/m^2)" },
    ParamSpec { name: "nre", default: T("5*8.0"), description: "Cloud effective radius (um)" },
    ParamSpec { name: "rhcld", default: F(-1.0), description: "Relative humidity within cloud layers" },
    ParamSpec { name: "krhclr", default: I(0), description: "Clear-layer water vapor adjustment" },
    ParamSpec { name: "jaer", default: T("5*0"), description: "Stratospheric aerosol types per layer" },
    ParamSpec { name: "zaer", default: T("5*0.0"), description: "Altitudes of stratospheric aerosol layers (km)" },
    ParamSpec { name: "taerst", default: T("5*0.0"), description: "Optical depth at 0.55um of stratospheric aerosol layers" },
    ParamSpec { name: "iaer", default: I(0), description: "Boundary layer aerosol ID" },
    ParamSpec { name: "vis", default: F(23.0), description: "Horizontal visibility due to aerosols at 0.55um (km)" },
    ParamSpec { name: "rhaer", default: F(-1.0), description: "Relative humidity for BL aerosol model" },
    ParamSpec { name: "wlbaer", default: T("47*0.0"), description: "Wavelength points when IAER is 5 (um)" },
    ParamSpec { name: "tbaer", default: T("47*0.0"), description: "Vertical optical depth of BL aerosols at 0.55um" },
    ParamSpec { name: "abaer", default: F(-1.0), description: "Angstrom exponent for BL aerosol extinction" },
    ParamSpec { name: "wbaer", default: T("47*0.950"), description: "Single-scatter albedo (IAER=5)" },
    ParamSpec { name: "gbaer", default: T("47*0.70"), description: "Asymmetry factor (IAER=5)" },
    ParamSpec { name: "pmaer", default: T("940*0.0"), description: "Legendre moments of BL phase function (IAER=5)" },
    ParamSpec { name: "zbaer", default: T("50*-1.0"), description: "Altitude grid for custom aerosol profile (km)" },
    ParamSpec { name: "dbaer", default: T("50*-1.0"), description: "Aerosol density at ZBAER points" },
    ParamSpec { name: "nothrm", default: I(-1), description: "Thermal emission ID (-1, 0, or 1)" },
    ParamSpec { name: "nosct", default: I(0), description: "BL aerosol scattering method ID" },
    ParamSpec { name: "kdist", default: I(3), description: "Transmission scheme ID" },
    ParamSpec { name: "zgrid1", default: F(0.0), description: "Lower-atmosphere resolution (km)" },
    ParamSpec { name: "zgrid2", default: F(30.0), description: "Upper-atmosphere resolution (km)" },
    ParamSpec { name: "ngrid", default: I(50), description: "Number of vertical grid points" },
    ParamSpec { name: "zout", default: T("0.0,100.0"), description: "Bottom and top altitudes for IOUT (km)" },
    ParamSpec { name: "iout", default: I(10), description: "Output format ID" },
    ParamSpec { name: "deltam", default: T("t"), description: "Use delta-m method (Wiscombe, 1977)" },
    ParamSpec { name: "corint", default: T("f"), description: "Use Nakajima & Tanaka delta-m correction" },
    ParamSpec { name: "lamber", default: T("t"), description: "Lambertian surface reflection" },
    ParamSpec { name: "ibcnd", default: I(0), description: "Boundary illumination mode" },
    ParamSpec { name: "saza", default: F(180.0), description: "Solar azimuth angle (deg)" },
    ParamSpec { name: "prnt", default: T("7*f"), description: "DISORT output option flags" },
    ParamSpec { name: "ipth", default: I(1), description: "Path mode" },
    ParamSpec { name: "fisot", default: F(0.0), description: "Top isotropic illumination (W/m^2)" },
    ParamSpec { name: "temis", default: F(0.0), description: "Top-layer emissivity" },
    ParamSpec { name: "nstr", default: I(4), description: "Number of internal radiation streams" },
    ParamSpec { name: "nzen", default: I(0), description: "Number of viewing zenith angles" },
    ParamSpec { name: "uzen", default: T("20*-1.0"), description: "Specific viewing zenith angles" },
    ParamSpec { name: "vzen", default: T("20*90.0"), description: "User nadir angles (180-UZEN)" },
    ParamSpec { name: "nphi", default: I(0), description: "Number of viewing azimuth angles" },
    ParamSpec { name: "phi", default: T("20*-1.0"), description: "Specific viewer azimuth angles" },
    ParamSpec { name: "imomc", default: I(3), description: "Cloud model phase function ID" },
    ParamSpec { name: "imoma", default: I(3), description: "BL aerosol phase function ID" },
    ParamSpec { name: "ttemp", default: F(-1.0), description: "Top-layer thermal emission temperature" },
    ParamSpec { name: "btemp", default: F(-1.0), description: "Surface (skin) temperature in Kelvin" },
    ParamSpec { name: "spowder", default: T("f"), description: "Additional sub-surface scattering layer" },
    ParamSpec { name: "idb", default: T("20*0"), description: "Diagnostic output IDs" },
];

/// Look up one parameter spec by name.
pub fn spec(name: &str) -> Option<&'static ParamSpec> {
    PARAMETERS.iter().find(|p| p.name == name)
}

/// Whether `name` is an accepted SBDART namelist key.
pub fn is_recognized(name: &str) -> bool {
    spec(name).is_some()
}

/// The complete default parameter set.
pub fn defaults() -> ParameterSet {
    PARAMETERS
        .iter()
        .map(|p| (p.name.to_string(), p.default.to_param()))
        .collect()
}

/// Validate that every entry of a baseline parameter set is whitelisted.
pub fn validate(baseline: &ParameterSet) -> Result<(), crate::error::DriverError> {
    for (name, _) in baseline.iter() {
        if !is_recognized(name) {
            return Err(crate::error::DriverError::UnknownParameter(name.to_string()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_has_unique_names() {
        for (i, p) in PARAMETERS.iter().enumerate() {
            assert!(
                !PARAMETERS[..i].iter().any(|q| q.name == p.name),
                "duplicate parameter {}",
                p.name
            );
        }
    }

    #[test]
    fn test_recognizes_sweep_parameters() {
        for name in ["idatm", "zcloud", "tcloud", "nre", "sza", "btemp", "iout"] {
            assert!(is_recognized(name), "{} should be recognized", name);
        }
        assert!(!is_recognized("bogus"));
        assert!(!is_recognized("IDATM"));
    }

    #[test]
    fn test_defaults_cover_table() {
        let defaults = defaults();
        assert_eq!(defaults.len(), PARAMETERS.len());
        assert_eq!(defaults.get("iout").and_then(|v| v.as_f64()), Some(10.0));
    }

    #[test]
    fn test_validate_rejects_unknown() {
        let good = ParameterSet::new().with("sza", 20.0);
        assert!(validate(&good).is_ok());

        let bad = ParameterSet::new().with("szaa", 20.0);
        assert!(validate(&bad).is_err());
    }
}
