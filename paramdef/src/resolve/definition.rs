//! Name-keyed record fields that are replaced wholesale when overridden.

use serde_json::{Map, Value};

use super::Resolver;
use crate::{KeyPath, ParamError, ParamResult, RecordSpec, check_value};

impl Resolver<'_> {
    /// Resolve a `definition` field.
    ///
    /// An absent or empty override keeps the default catalogue; any other
    /// override replaces it entirely. Missing record fields take the field's
    /// own default. `keys` fields may name any entry of the catalogue being
    /// resolved.
    pub(super) fn resolve_definition(
        &self,
        record: &RecordSpec,
        slot: Option<&Value>,
        path: &KeyPath,
    ) -> ParamResult<Value> {
        let catalogue = match slot {
            None => &record.default,
            Some(Value::Object(supplied)) if supplied.is_empty() => &record.default,
            Some(Value::Object(supplied)) => supplied,
            Some(_) => {
                return Err(ParamError::shape(
                    path,
                    "definition overrides must map names to records",
                ));
            }
        };
        let names: Vec<String> = catalogue.keys().cloned().collect();

        let mut parsed = Map::new();
        for (name, entry) in catalogue {
            let Value::Object(record_map) = entry else {
                return Err(ParamError::shape(
                    &path.child(name),
                    "definition records must be mappings",
                ));
            };
            let mut resolved = record_map.clone();
            for (field, field_spec) in record.fields.iter() {
                let value = record_map
                    .get(field)
                    .or(field_spec.default.as_ref())
                    .cloned()
                    .ok_or_else(|| ParamError::missing_field(path, field))?;
                let checked = check_value(value, field_spec, &path.child(field), &names, self.pops)?;
                resolved.insert(field.to_owned(), checked);
            }
            parsed.insert(name.clone(), Value::Object(resolved));
        }
        Ok(Value::Object(parsed))
    }
}
