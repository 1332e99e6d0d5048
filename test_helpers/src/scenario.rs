//! The animal/habitat scenario shared by integration tests.
//!
//! The schema defines an `animals` catalogue and a `habitats` list under
//! `classes`, a two-level `demographics` sub-dict over both, and a
//! `neighbors` definition. Override layers are split the way callers usually
//! split them: a file, a directory of files, and a final file that wins.

use anyhow::Result;
use camino::Utf8PathBuf;

use crate::documents::DocumentDir;

/// Schema document (YAML).
pub const SCHEMA: &str = r"
classes:
  animals:
    type: definition
    fields:
      legs:
        type: int
        min: 0
        default: 4
      predators:
        type: keys
        default: []
    default:
      cat:
        legs: 4
      turtle:
        legs: 4
  habitats:
    type: array
    values: [barn, ocean, forest]
    default: [barn, ocean]
demographics:
  type: sub-dict
  keys: [animals, habitats]
  default:
    num:
      type: int
      min: 0
      default: 1
    color:
      type: enum
      values: [brown, green, indigo]
      default: brown
    prob_happy:
      type: float
      min: 0
      max: 1
      default: 0.5
    age_bins:
      type: bin
      fields:
        age:
          type: int
          min: 0
      default:
        0:
          age: 1
neighbors:
  type: definition
  fields:
    distance:
      type: int
      min: 0
    species:
      type: array
      class: animals
      default: []
    friends:
      type: keys
      default: []
  default:
    blue_buddies:
      distance: 10
";

/// First override layer.
pub const LAYER_A: &str = r"
demographics:
  cat:
    barn:
      color: green
      age_bins:
        1:
          age: 3
  turtle:
    ocean:
      prob_happy: 0.9
";

/// Second override layer, file one of the `b` directory.
pub const LAYER_B_NEIGHBORS: &str = r"
neighbors:
  blue_buddies:
    distance: 40
    species: [cat]
  red_rivals:
    distance: 5
    species: [turtle]
    friends: [blue_buddies]
";

/// Second override layer, file two of the `b` directory (JSON).
pub const LAYER_B_DEMOGRAPHICS: &str = r#"{
  "demographics": {"cat": {"barn": {"num": 5}}}
}"#;

/// Third override layer; wins over the first two.
pub const LAYER_C: &str = r"
demographics:
  cat:
    barn:
      color: indigo
      num: 2
      age_bins:
        2:
          age: 14
  turtle:
    ocean:
      prob_happy: 0.95
neighbors:
  blue_buddies:
    distance: 90
";

/// A layer with an out-of-range value four levels deep.
pub const LAYER_OUT_OF_RANGE: &str = r"
demographics:
  turtle:
    ocean:
      prob_happy: 1.5
";

/// A layer with two keys the schema does not define.
pub const LAYER_UNUSED: &str = r"
demographics:
  cat:
    barn:
      colour: green
habitat_notes:
  barn: drafty
";

/// Paths of the scenario documents written to disk.
pub struct ScenarioPaths {
    /// Schema file.
    pub schema: Utf8PathBuf,
    /// First override file.
    pub a: Utf8PathBuf,
    /// Directory holding the second override layer.
    pub b: Utf8PathBuf,
    /// Third override file.
    pub c: Utf8PathBuf,
    /// Override file with an out-of-range value.
    pub out_of_range: Utf8PathBuf,
    /// Override file with unused keys.
    pub unused: Utf8PathBuf,
}

impl ScenarioPaths {
    /// The three regular layers in application order.
    #[must_use]
    pub fn layers(&self) -> Vec<Utf8PathBuf> {
        vec![self.a.clone(), self.b.clone(), self.c.clone()]
    }
}

/// Write the scenario into `docs`.
///
/// The `b` directory also holds a `README.txt` that loaders must skip.
///
/// # Errors
///
/// Returns an error if any document cannot be written.
pub fn write_scenario(docs: &DocumentDir) -> Result<ScenarioPaths> {
    let b = docs.mkdir("params/b")?;
    docs.write("params/b/neighbors.yml", LAYER_B_NEIGHBORS)?;
    docs.write("params/b/demographics.json", LAYER_B_DEMOGRAPHICS)?;
    docs.write("params/b/README.txt", "not a parameter document")?;
    Ok(ScenarioPaths {
        schema: docs.write("params/defs.yaml", SCHEMA)?,
        a: docs.write("params/a.yaml", LAYER_A)?,
        b,
        c: docs.write("params/c.yaml", LAYER_C)?,
        out_of_range: docs.write("params/a_error.yaml", LAYER_OUT_OF_RANGE)?,
        unused: docs.write("params/a_unused.yaml", LAYER_UNUSED)?,
    })
}
