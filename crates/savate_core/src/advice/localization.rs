//! Wording catalogue
//!
//! Every coach-facing text (grade labels, advice, report headings) is a Fluent
//! message. Locales are swappable resources: the crate embeds fr-FR and en-US,
//! and a deployment can load its own `.ftl` files from a directory.

use crate::data::embedded_catalogues;
use crate::error::CoreError;
use fluent::{FluentArgs, FluentBundle, FluentResource, FluentValue};
use fluent_langneg::{negotiate_languages, NegotiationStrategy};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};
use unic_langid::LanguageIdentifier;

pub const SUPPORTED_LOCALES: &[&str] = &["fr-FR", "en-US"];
pub const DEFAULT_LOCALE: &str = "fr-FR";

pub struct AdviceCatalog {
    bundles: HashMap<String, FluentBundle<FluentResource>>,
    current_locale: String,
    fallback_locale: String,
}

impl Default for AdviceCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for AdviceCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut loaded: Vec<&String> = self.bundles.keys().collect();
        loaded.sort();
        f.debug_struct("AdviceCatalog")
            .field("loaded", &loaded)
            .field("current_locale", &self.current_locale)
            .field("fallback_locale", &self.fallback_locale)
            .finish()
    }
}

impl AdviceCatalog {
    /// Empty catalogue; every lookup returns the `[key]` marker until a locale is loaded.
    pub fn new() -> Self {
        Self {
            bundles: HashMap::new(),
            current_locale: DEFAULT_LOCALE.to_string(),
            fallback_locale: DEFAULT_LOCALE.to_string(),
        }
    }

    /// Catalogue with every embedded locale loaded, set to `locale`.
    pub fn builtin(locale: &str) -> Result<Self, CoreError> {
        let mut catalog = Self::new();
        for (id, content) in embedded_catalogues() {
            catalog.load_locale(id, content)?;
        }
        catalog.select_locale(locale)?;
        Ok(catalog)
    }

    /// Load `<locale>.ftl` for every supported locale found in `dir_path`.
    /// Files replace embedded bundles of the same locale.
    pub fn load_from_dir(&mut self, dir_path: &Path) -> Result<(), CoreError> {
        for locale in SUPPORTED_LOCALES {
            let file_path = dir_path.join(format!("{}.ftl", locale));
            if file_path.exists() {
                let content = fs::read_to_string(&file_path)?;
                self.load_locale(locale, &content)?;
            }
        }
        Ok(())
    }

    pub fn load_locale(&mut self, locale: &str, ftl_content: &str) -> Result<(), CoreError> {
        let resource = FluentResource::try_new(ftl_content.to_string()).map_err(|(_, errors)| {
            CoreError::Localisation(format!("{}: {} FTL parse errors", locale, errors.len()))
        })?;

        let lang_id: LanguageIdentifier = locale
            .parse()
            .map_err(|_| CoreError::Localisation(format!("Invalid locale: {}", locale)))?;

        let mut bundle = FluentBundle::new(vec![lang_id]);
        bundle.set_use_isolating(false);
        bundle.add_resource(resource).map_err(|errors| {
            CoreError::Localisation(format!("{}: {} duplicate messages", locale, errors.len()))
        })?;

        debug!("Loaded wording catalogue {}", locale);
        self.bundles.insert(locale.to_string(), bundle);
        Ok(())
    }

    pub fn set_locale(&mut self, locale: &str) -> Result<(), CoreError> {
        if !self.bundles.contains_key(locale) {
            return Err(CoreError::LocaleNotLoaded { locale: locale.to_string() });
        }
        self.current_locale = locale.to_string();
        Ok(())
    }

    pub fn current_locale(&self) -> &str {
        &self.current_locale
    }

    /// Pick the best loaded locale for a list of requested language tags.
    pub fn negotiate_locale(&self, requested: &[&str]) -> String {
        self.best_match(requested, true).unwrap_or_else(|| self.fallback_locale.clone())
    }

    /// Switch to the loaded locale that best matches `requested`, so a bare
    /// language such as `en` picks `en-US`.
    pub fn select_locale(&mut self, requested: &str) -> Result<String, CoreError> {
        let locale = self
            .best_match(&[requested], false)
            .ok_or_else(|| CoreError::LocaleNotLoaded { locale: requested.to_string() })?;
        self.set_locale(&locale)?;
        debug!("Locale '{}' resolved to {}", requested, locale);
        Ok(locale)
    }

    fn best_match(&self, requested: &[&str], with_default: bool) -> Option<String> {
        let available: Vec<LanguageIdentifier> =
            self.bundles.keys().filter_map(|k| k.parse().ok()).collect();

        let requested: Vec<LanguageIdentifier> =
            requested.iter().filter_map(|l| l.parse().ok()).collect();

        let default: Option<LanguageIdentifier> =
            if with_default { self.fallback_locale.parse().ok() } else { None };

        let negotiated = negotiate_languages(
            &requested,
            &available,
            default.as_ref(),
            NegotiationStrategy::Filtering,
        );

        negotiated.first().map(|l| l.to_string())
    }

    pub fn has(&self, key: &str) -> bool {
        self.bundles
            .get(&self.current_locale)
            .map(|bundle| bundle.has_message(key))
            .unwrap_or(false)
    }

    pub fn text(&self, key: &str) -> String {
        self.format(key, None)
    }

    /// Message with a single `$value`-style argument.
    pub fn text_with(&self, key: &str, name: &str, value: &str) -> String {
        let mut args = FluentArgs::new();
        args.set(name.to_string(), FluentValue::from(value.to_string()));
        self.format(key, Some(&args))
    }

    /// Current locale first, then the fallback locale, then the `[key]` marker.
    pub fn format(&self, key: &str, args: Option<&FluentArgs>) -> String {
        if let Some(text) = self.format_in(&self.current_locale, key, args) {
            return text;
        }

        if self.current_locale != self.fallback_locale {
            if let Some(text) = self.format_in(&self.fallback_locale, key, args) {
                return text;
            }
        }

        warn!("Missing wording for '{}' in {}", key, self.current_locale);
        format!("[{}]", key)
    }

    fn format_in(&self, locale: &str, key: &str, args: Option<&FluentArgs>) -> Option<String> {
        let bundle = self.bundles.get(locale)?;
        let pattern = bundle.get_message(key)?.value()?;
        let mut errors = vec![];
        let formatted = bundle.format_pattern(pattern, args, &mut errors);
        if !errors.is_empty() {
            warn!("Formatting '{}' in {}: {} errors", key, locale, errors.len());
        }
        Some(formatted.into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_locales() {
        let fr = AdviceCatalog::builtin("fr-FR").unwrap();
        assert_eq!(fr.text("level-very-good"), "Très Bon");
        let en = AdviceCatalog::builtin("en-US").unwrap();
        assert_eq!(en.text("level-very-good"), "Very Good");
    }

    #[test]
    fn test_unknown_locale_is_rejected() {
        let err = AdviceCatalog::builtin("de-DE").unwrap_err();
        assert!(matches!(err, CoreError::LocaleNotLoaded { .. }));
    }

    #[test]
    fn test_arguments_without_isolation_marks() {
        let fr = AdviceCatalog::builtin("fr-FR").unwrap();
        assert_eq!(
            fr.text_with("report-subtitle", "club", "CBF Montmorency"),
            "CBF Montmorency - Synthèse d'évaluation"
        );
    }

    #[test]
    fn test_missing_key_falls_back_then_marks() {
        let mut catalog = AdviceCatalog::new();
        catalog.load_locale("fr-FR", "only-fr = Seulement en français").unwrap();
        catalog.load_locale("en-US", "greeting = Hello").unwrap();
        catalog.set_locale("en-US").unwrap();
        assert_eq!(catalog.text("greeting"), "Hello");
        assert_eq!(catalog.text("only-fr"), "Seulement en français");
        assert_eq!(catalog.text("nowhere"), "[nowhere]");
        assert!(!catalog.has("only-fr"));
    }

    #[test]
    fn test_locale_negotiation() {
        let catalog = AdviceCatalog::builtin("fr-FR").unwrap();
        assert_eq!(catalog.negotiate_locale(&["en", "fr"]), "en-US");
        assert_eq!(catalog.negotiate_locale(&["de"]), "fr-FR");
    }

    #[test]
    fn test_select_locale_accepts_bare_language() {
        let mut catalog = AdviceCatalog::builtin("en").unwrap();
        assert_eq!(catalog.current_locale(), "en-US");
        assert_eq!(catalog.select_locale("fr").unwrap(), "fr-FR");
        assert_eq!(catalog.text("level-very-good"), "Très Bon");
        assert!(catalog.select_locale("de").is_err());
        assert_eq!(catalog.current_locale(), "fr-FR");
    }

    #[test]
    fn test_load_from_dir_overrides_wording() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("en-US.ftl"), "level-good = Solid").unwrap();
        let mut catalog = AdviceCatalog::builtin("en-US").unwrap();
        catalog.load_from_dir(dir.path()).unwrap();
        assert_eq!(catalog.text("level-good"), "Solid");
        // fr-FR was not in the directory and keeps its embedded bundle
        catalog.set_locale("fr-FR").unwrap();
        assert_eq!(catalog.text("level-good"), "Bon");
    }

    #[test]
    fn test_broken_ftl_is_an_error() {
        let mut catalog = AdviceCatalog::new();
        assert!(catalog.load_locale("en-US", "= no id").is_err());
        assert!(catalog.load_locale("not a locale!", "a = b").is_err());
    }

    #[test]
    fn test_embedded_catalogues_share_keys() {
        let mut fr = AdviceCatalog::builtin("fr-FR").unwrap();
        let ids: Vec<String> = crate::data::FR_FR_FTL
            .lines()
            .filter_map(|line| line.split_once(" = ").map(|(id, _)| id.trim().to_string()))
            .filter(|id| !id.starts_with('#'))
            .collect();
        assert!(ids.len() > 50);
        fr.set_locale("en-US").unwrap();
        for id in ids {
            assert!(fr.has(&id), "en-US lacks {}", id);
        }
    }
}
