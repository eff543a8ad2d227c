//! Localizer: flattens raw per-field, per-locale data into one field
//! mapping per locale.

use cda_model::{FieldValue, Fields, Locale, Resource, SyncedSpace};

/// Rebuild `resource.localized` for every locale in `locales`.
///
/// For each locale the mapping is built fresh from the raw fields: a field
/// appears only when its raw value has a non-null entry under that locale's
/// code. The new mapping replaces whatever was stored for that code before.
pub fn localize(resource: &mut Resource, locales: &[Locale]) {
    for locale in locales {
        let fields: Fields = resource
            .raw_fields
            .iter()
            .filter_map(|(name, per_locale)| {
                let value = per_locale.get(&locale.code)?;
                if value.is_null() {
                    return None;
                }
                Some((name.clone(), FieldValue::Json(value.clone())))
            })
            .collect();
        resource.localized.insert(locale.code.clone(), fields);
    }
}

/// Localize every asset and entry in a sync feed page.
///
/// Returns the number of resources localized.
pub fn localize_all(space: &SyncedSpace, locales: &[Locale]) -> usize {
    let mut count = 0;
    for item in &space.items {
        let mut resource = item.write();
        if resource.kind().is_localizable() {
            localize(&mut resource, locales);
            count += 1;
        }
    }
    count
}
