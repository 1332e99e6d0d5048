//! Auto-expansion of a template over one or two populations.

use serde_json::{Map, Value};

use super::Resolver;
use crate::{FieldSpec, KeyPath, ParamError, ParamResult, PopulationEntry, SubDictSpec};

impl Resolver<'_> {
    /// Resolve a `sub-dict` field.
    ///
    /// The template is resolved once per member of the outer population at
    /// `<path>.<member>`, whether or not the override mentions that member.
    /// With a second population, each inner member is resolved again beneath
    /// its outer member at `<path>.<member>.<inner>`.
    pub(super) fn resolve_sub_dict(
        &self,
        sub: &SubDictSpec,
        slot: Option<&Value>,
        path: &KeyPath,
    ) -> ParamResult<Value> {
        let overrides = match slot {
            None => None,
            Some(Value::Object(map)) => Some(map),
            Some(_) => {
                return Err(ParamError::shape(
                    path,
                    "sub-dict overrides must be keyed by population member",
                ));
            }
        };
        let outer = self.pops.lookup(&sub.outer, path)?;
        let inner = sub
            .inner
            .as_deref()
            .map(|class| self.pops.lookup(class, path))
            .transpose()?;

        let mut expanded = Map::new();
        for member in outer.members() {
            let member_path = path.child(member);
            let member_slot = overrides.and_then(|map| map.get(member));
            let mut resolved = self.resolve_slot(&sub.template, member_slot, &member_path)?;
            if let Some(inner_pop) = inner {
                self.expand_inner(&sub.template, inner_pop, member_slot, &member_path, &mut resolved)?;
            }
            expanded.insert(member.to_owned(), resolved);
        }
        Ok(Value::Object(expanded))
    }

    fn expand_inner(
        &self,
        template: &FieldSpec,
        inner: &PopulationEntry,
        slot: Option<&Value>,
        path: &KeyPath,
        resolved: &mut Value,
    ) -> ParamResult<()> {
        let Value::Object(nested) = resolved else {
            return Err(ParamError::shape(
                path,
                "a two-level sub-dict needs a mapping at each outer member",
            ));
        };
        let overrides = slot.and_then(Value::as_object);
        for member in inner.members() {
            let member_slot = overrides.and_then(|map| map.get(member));
            let value = self.resolve_slot(template, member_slot, &path.child(member))?;
            nested.insert(member.to_owned(), value);
        }
        Ok(())
    }
}
