//! Fluent bundle loading and message formatting.

use crate::error::{I18nError, I18nResult};
use crate::locale::Locale;
use fluent_bundle::concurrent::FluentBundle;
use fluent_bundle::{FluentArgs, FluentResource, FluentValue};
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, warn};

type Bundle = FluentBundle<FluentResource>;

/// Formats localized messages for one active locale, falling back to the
/// default locale for missing keys.
pub struct Translator {
    active: Locale,
    bundles: HashMap<Locale, Bundle>,
}

impl fmt::Debug for Translator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Translator")
            .field("active", &self.active)
            .field("locales", &self.bundles.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl Translator {
    /// Loads every embedded locale and activates `active`.
    pub fn new(active: Locale) -> I18nResult<Self> {
        let mut bundles = HashMap::new();
        for locale in Locale::ALL {
            bundles.insert(locale, Self::build_bundle(locale)?);
        }
        debug!("Loaded {} locales, active locale {}", bundles.len(), active);
        Ok(Self { active, bundles })
    }

    fn build_bundle(locale: Locale) -> I18nResult<Bundle> {
        let resource = FluentResource::try_new(locale.source().to_string()).map_err(
            |(_, errors)| I18nError::FluentParse {
                locale: locale.code().to_string(),
                errors: errors.iter().map(|e| format!("{e:?}")).collect(),
            },
        )?;

        let mut bundle = FluentBundle::new_concurrent(vec![locale.to_language_identifier()?]);
        bundle.set_use_isolating(false);
        bundle
            .add_resource(resource)
            .map_err(|errors| I18nError::BundleCreation {
                locale: locale.code().to_string(),
                errors: errors.iter().map(|e| format!("{e:?}")).collect(),
            })?;
        Ok(bundle)
    }

    /// The locale replies are rendered in.
    pub const fn locale(&self) -> Locale {
        self.active
    }

    /// Whether `key` exists in `locale`.
    pub fn has_message(&self, locale: Locale, key: &str) -> bool {
        self.bundles
            .get(&locale)
            .is_some_and(|bundle| bundle.has_message(key))
    }

    /// Formats a message without arguments.
    pub fn get(&self, key: &str) -> String {
        self.get_with_args(key, &[])
    }

    /// Formats a message with arguments. Never fails: a key missing from
    /// every locale renders as the key itself.
    pub fn get_with_args(&self, key: &str, args: &[(&str, FluentValue<'_>)]) -> String {
        let mut fluent_args = FluentArgs::new();
        for (name, value) in args {
            fluent_args.set(*name, value.clone());
        }

        self.format(self.active, key, &fluent_args)
            .or_else(|_| {
                if self.active != Locale::default() {
                    warn!(
                        "Message '{}' missing in {}, falling back to {}",
                        key,
                        self.active,
                        Locale::default()
                    );
                }
                self.format(Locale::default(), key, &fluent_args)
            })
            .unwrap_or_else(|e| {
                warn!("{}", e);
                key.to_string()
            })
    }

    fn format(&self, locale: Locale, key: &str, args: &FluentArgs<'_>) -> I18nResult<String> {
        let missing = || I18nError::MessageNotFound {
            key: key.to_string(),
        };

        let bundle = self.bundles.get(&locale).ok_or_else(missing)?;
        let pattern = bundle
            .get_message(key)
            .and_then(|message| message.value())
            .ok_or_else(missing)?;

        let mut errors = Vec::new();
        let formatted = bundle.format_pattern(pattern, Some(args), &mut errors);
        if !errors.is_empty() {
            warn!("Formatting errors for message '{}': {:?}", key, errors);
        }
        Ok(formatted.into_owned())
    }
}
