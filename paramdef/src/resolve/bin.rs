//! Integer-keyed record fields merged over their default set.

use serde_json::{Map, Value};

use super::Resolver;
use crate::{KeyPath, ParamError, ParamResult, RecordSpec, check_value, merge_maps};

impl Resolver<'_> {
    /// Resolve a `bin` field.
    ///
    /// Without an override the default set is returned as declared.
    /// Otherwise the override is merged onto the defaults, so callers can add
    /// bins or change single fields of existing ones, and every declared
    /// field of every bin is checked at `<path>.<bin>.<field>`.
    pub(super) fn resolve_bin(
        &self,
        record: &RecordSpec,
        slot: Option<&Value>,
        path: &KeyPath,
    ) -> ParamResult<Value> {
        let Some(slot_value) = slot else {
            return Ok(Value::Object(record.default.clone()));
        };
        let Value::Object(supplied) = slot_value else {
            return Err(ParamError::shape(
                path,
                "bin overrides must map bin ids to records",
            ));
        };

        let mut parsed = Map::new();
        for (id, entry) in merge_maps(&record.default, supplied) {
            let bin_id = parse_bin_id(&id, path)?;
            let bin_path = path.child(&id);
            let Value::Object(mut fields) = entry else {
                return Err(ParamError::shape(&bin_path, "bin records must be mappings"));
            };
            for (field, field_spec) in record.fields.iter() {
                let value = fields
                    .get_mut(field)
                    .ok_or_else(|| ParamError::missing_field(&bin_path, field))?;
                *value = check_value(value.take(), field_spec, &bin_path.child(field), &[], self.pops)?;
            }
            parsed.insert(bin_id.to_string(), Value::Object(fields));
        }
        Ok(Value::Object(parsed))
    }
}

fn parse_bin_id(id: &str, path: &KeyPath) -> ParamResult<i64> {
    id.trim().parse::<i64>().map_err(|err| {
        tracing::error!(path = %path, key = id, error = %err, "bin ids must be integers");
        ParamError::BinKey {
            path: path.clone(),
            key: id.to_owned(),
        }
    })
}
