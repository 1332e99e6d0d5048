//! End-to-end parameter creation: load, merge, resolve, save, and audit.

use camino::{Utf8Path, Utf8PathBuf};
use serde_json::Value;

use crate::file::{load_all, load_document, save_document};
use crate::{
    FieldSpec, KeyPath, ParamError, ParamResult, Resolver, UnusedParam, find_unused, merge_layers,
    resolve_classes,
};

/// Caller options for a resolution run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResolveOptions {
    error_on_unused: bool,
    out_path: Option<Utf8PathBuf>,
}

impl ResolveOptions {
    /// Options that tolerate unused overrides and write nothing.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            error_on_unused: false,
            out_path: None,
        }
    }

    /// Fail the run when any override goes unused.
    #[must_use]
    pub const fn error_on_unused(mut self, enabled: bool) -> Self {
        self.error_on_unused = enabled;
        self
    }

    /// Write the resolved tree to `path` before auditing.
    #[must_use]
    pub fn out_path(mut self, path: impl Into<Utf8PathBuf>) -> Self {
        self.out_path = Some(path.into());
        self
    }

    /// Whether unused overrides are fatal.
    #[must_use]
    pub const fn is_error_on_unused(&self) -> bool {
        self.error_on_unused
    }

    /// Where the resolved tree is written, if anywhere.
    #[must_use]
    pub fn output(&self) -> Option<&Utf8Path> {
        self.out_path.as_deref()
    }
}

/// A fully resolved parameter tree and the overrides it did not use.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedParams {
    params: Value,
    unused: Vec<UnusedParam>,
}

impl ResolvedParams {
    /// The resolved tree.
    #[must_use]
    pub const fn params(&self) -> &Value {
        &self.params
    }

    /// Consume the result, keeping only the resolved tree.
    #[must_use]
    pub fn into_params(self) -> Value {
        self.params
    }

    /// Override entries that did not contribute to the tree.
    #[must_use]
    pub const fn unused(&self) -> &[UnusedParam] {
        self.unused.as_slice()
    }

    /// Number of unused override entries.
    #[must_use]
    pub const fn unused_count(&self) -> usize {
        self.unused.len()
    }

    /// Sorted integer ids of the bin set found by following `keys` from the
    /// root.
    ///
    /// Returns `None` when the keys do not lead to a mapping or a key there
    /// is not an integer.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use paramdef::{ResolveOptions, resolve_params};
    /// use serde_json::json;
    ///
    /// let schema = json!({"age_bins": {
    ///     "type": "bin",
    ///     "fields": {"age": {"type": "int"}},
    ///     "default": {"0": {"age": 1}},
    /// }});
    /// let layer = json!({"age_bins": {"10": {"age": 30}, "2": {"age": 5}}});
    /// let resolved = resolve_params(&schema, &[layer], &ResolveOptions::new())?;
    /// assert_eq!(resolved.bin_ids(&["age_bins"]), Some(vec![0, 2, 10]));
    /// # Ok::<_, paramdef::ParamError>(())
    /// ```
    #[must_use]
    pub fn bin_ids(&self, keys: &[&str]) -> Option<Vec<i64>> {
        let bins = keys
            .iter()
            .try_fold(&self.params, |node, key| node.get(*key))?
            .as_object()?;
        let mut ids = bins
            .keys()
            .map(|key| key.parse::<i64>().ok())
            .collect::<Option<Vec<_>>>()?;
        ids.sort_unstable();
        Some(ids)
    }
}

/// Resolve in-memory override layers against an in-memory schema.
///
/// Layers are merged left to right, classes are resolved into the
/// population index, and the whole tree is then resolved from the root.
/// When an output path is configured the tree is written before the unused
/// audit runs. Each unused entry is logged at `warn` and the total at
/// `info`.
///
/// # Errors
///
/// Returns the first schema, resolution, or write error. With
/// [`ResolveOptions::error_on_unused`] set, returns
/// [`ParamError::UnusedParameters`] when any override goes unused.
///
/// # Examples
///
/// ```rust
/// use paramdef::{ResolveOptions, resolve_params};
/// use serde_json::json;
///
/// let schema = json!({
///     "size": {"type": "int", "min": 0, "default": 3},
///     "mode": {"type": "enum", "values": ["fast", "slow"], "default": "slow"},
/// });
/// let layers = [json!({"size": 5}), json!({"mode": "fast", "colour": "red"})];
/// let resolved = resolve_params(&schema, &layers, &ResolveOptions::new())?;
/// assert_eq!(resolved.params(), &json!({"size": 5, "mode": "fast"}));
/// assert_eq!(resolved.unused_count(), 1);
/// # Ok::<_, paramdef::ParamError>(())
/// ```
pub fn resolve_params(
    schema: &Value,
    layers: &[Value],
    options: &ResolveOptions,
) -> ParamResult<ResolvedParams> {
    let spec = FieldSpec::from_value(schema)?;
    let raw = merge_layers(layers);
    let pops = resolve_classes(&spec, &raw)?;
    tracing::debug!(layers = layers.len(), populations = pops.len(), "resolving parameters");
    let params = Resolver::new(&pops).resolve(&spec, &raw, &KeyPath::root())?;

    if let Some(path) = options.output() {
        save_document(path, &params)?;
    }

    let unused = find_unused(&params, &raw);
    for entry in &unused {
        tracing::warn!(path = %entry.path, kind = entry.kind.as_str(), "{entry}");
    }
    tracing::info!(count = unused.len(), "unused parameters");
    if options.is_error_on_unused() && !unused.is_empty() {
        return Err(ParamError::UnusedParameters {
            count: unused.len(),
        });
    }
    Ok(ResolvedParams { params, unused })
}

/// Load the schema and override documents, then resolve them with
/// [`resolve_params`].
///
/// Each override path may be a file or a directory of files; they apply in
/// the order given, later paths winning.
///
/// # Errors
///
/// Returns [`ParamError::Document`] or [`ParamError::UnsupportedFormat`]
/// when a document cannot be loaded, and otherwise whatever
/// [`resolve_params`] returns.
///
/// # Examples
///
/// ```rust,no_run
/// use camino::Utf8Path;
/// use paramdef::{ResolveOptions, create_params};
///
/// let options = ResolveOptions::new().out_path("out/params.yaml");
/// let resolved = create_params(
///     Utf8Path::new("params/defs.yaml"),
///     &["params/a.yaml", "params/b"],
///     &options,
/// )?;
/// println!("{} unused", resolved.unused_count());
/// # Ok::<_, paramdef::ParamError>(())
/// ```
pub fn create_params<P>(
    schema_path: &Utf8Path,
    override_paths: &[P],
    options: &ResolveOptions,
) -> ParamResult<ResolvedParams>
where
    P: AsRef<Utf8Path>,
{
    let schema = Value::Object(load_document(schema_path)?);
    let layers = load_all(override_paths)?;
    resolve_params(&schema, &layers, options)
}
