//! Data embedded in the binary at compile time.
//!
//! - Club grading scale (Luc Léger test, 15-60 years, steps 7-15)
//! - Wording catalogues (Fluent) for every supported locale

/// Built-in club grade table
pub const LUC_LEGER_CLUB_YAML: &str = include_str!("../../../data/grading/luc_leger_club.yaml");

/// French wording (reference locale)
pub const FR_FR_FTL: &str = include_str!("../../../data/locales/fr-FR.ftl");

/// English wording
pub const EN_US_FTL: &str = include_str!("../../../data/locales/en-US.ftl");

/// Embedded catalogues as (locale, FTL source) pairs.
pub fn embedded_catalogues() -> [(&'static str, &'static str); 2] {
    [("fr-FR", FR_FR_FTL), ("en-US", EN_US_FTL)]
}
