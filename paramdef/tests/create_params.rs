//! End-to-end coverage of `create_params` over the animal/habitat scenario.
#![allow(
    unfulfilled_lint_expectations,
    reason = "clippy::expect_used is denied globally; tests may not hit those branches"
)]
#![expect(
    clippy::expect_used,
    reason = "fixtures panic when scenario documents cannot be written"
)]

use anyhow::{Result, anyhow, ensure};
use camino::Utf8PathBuf;
use paramdef::file::load_document;
use paramdef::{ParamError, ParamResult, ResolveOptions, ResolvedParams, UnusedKind, create_params};
use rstest::{fixture, rstest};
use serde_json::{Value, json};
use test_helpers::documents::DocumentDir;
use test_helpers::scenario::{ScenarioPaths, write_scenario};

struct Scenario {
    docs: DocumentDir,
    paths: ScenarioPaths,
}

#[fixture]
fn scenario() -> Scenario {
    let docs = DocumentDir::new().expect("temporary directory");
    let paths = write_scenario(&docs).expect("scenario documents");
    Scenario { docs, paths }
}

fn ok<T>(result: ParamResult<T>) -> Result<T> {
    result.map_err(|err| anyhow!(err.to_string()))
}

fn create(scenario: &Scenario, layers: &[Utf8PathBuf], options: &ResolveOptions) -> ParamResult<ResolvedParams> {
    create_params(&scenario.paths.schema, layers, options)
}

#[rstest]
fn layers_merge_in_order(scenario: Scenario) -> Result<()> {
    let resolved = ok(create(&scenario, &scenario.paths.layers(), &ResolveOptions::new()))?;
    let params = resolved.params();
    let barn = &params["demographics"]["cat"]["barn"];
    ensure!(barn["color"] == json!("indigo"), "got {barn}");
    ensure!(barn["num"] == json!(2), "got {barn}");
    ensure!(
        barn["age_bins"] == json!({"0": {"age": 1}, "1": {"age": 3}, "2": {"age": 14}}),
        "got {barn}"
    );
    ensure!(params["demographics"]["turtle"]["ocean"]["prob_happy"] == json!(0.95));
    ensure!(params["neighbors"]["blue_buddies"]["distance"] == json!(90));
    ensure!(params["neighbors"]["blue_buddies"]["species"] == json!(["cat"]));
    ensure!(params["neighbors"]["red_rivals"]["friends"] == json!(["blue_buddies"]));
    ensure!(resolved.unused_count() == 0, "unexpected unused: {:?}", resolved.unused());
    ensure!(resolved.bin_ids(&["demographics", "cat", "barn", "age_bins"]) == Some(vec![0, 1, 2]));
    Ok(())
}

#[rstest]
fn classes_feed_populations(scenario: Scenario) -> Result<()> {
    let resolved = ok(create(&scenario, &scenario.paths.layers(), &ResolveOptions::new()))?;
    let params = resolved.params();
    ensure!(params["classes"]["animals"].get("cat").is_some());
    ensure!(params["classes"]["animals"]["cat"]["predators"] == json!([]));
    ensure!(params["classes"]["habitats"] == json!(["barn", "ocean"]));
    Ok(())
}

#[rstest]
fn defaults_fill_every_population_member(scenario: Scenario) -> Result<()> {
    let resolved = ok(create(&scenario, &[], &ResolveOptions::new()))?;
    let demographics = &resolved.params()["demographics"];
    let member = json!({
        "num": 1,
        "color": "brown",
        "prob_happy": 0.5,
        "age_bins": {"0": {"age": 1}},
    });
    for animal in ["cat", "turtle"] {
        for habitat in ["barn", "ocean"] {
            ensure!(
                demographics[animal][habitat] == member,
                "{animal}.{habitat}: {}",
                demographics[animal][habitat]
            );
        }
        ensure!(demographics[animal].get("forest").is_none());
        ensure!(demographics[animal]["num"] == json!(1));
    }
    ensure!(resolved.params()["neighbors"] == json!({"blue_buddies": {"distance": 10, "species": [], "friends": []}}));
    Ok(())
}

#[rstest]
fn out_of_range_values_name_their_path(scenario: Scenario) -> Result<()> {
    let mut layers = scenario.paths.layers();
    layers.push(scenario.paths.out_of_range.clone());
    let err = create(&scenario, &layers, &ResolveOptions::new())
        .err()
        .ok_or_else(|| anyhow!("expected a validation failure"))?;
    ensure!(matches!(err, ParamError::Validation { .. }), "got {err}");
    ensure!(
        err.to_string().ends_with("[.demographics.turtle.ocean.prob_happy]"),
        "got {err}"
    );
    Ok(())
}

#[rstest]
fn unused_keys_are_counted(scenario: Scenario) -> Result<()> {
    let mut layers = scenario.paths.layers();
    layers.push(scenario.paths.unused.clone());
    let resolved = ok(create(&scenario, &layers, &ResolveOptions::new()))?;
    ensure!(resolved.unused_count() == 2, "got {:?}", resolved.unused());
    let paths: Vec<&str> = resolved.unused().iter().map(|entry| entry.path.as_str()).collect();
    ensure!(
        paths == [".demographics.cat.barn.colour", ".habitat_notes"],
        "got {paths:?}"
    );
    ensure!(resolved.unused().iter().all(|entry| entry.kind == UnusedKind::NotInSchema));
    Ok(())
}

#[rstest]
fn unused_keys_can_abort(scenario: Scenario) -> Result<()> {
    let mut layers = scenario.paths.layers();
    layers.push(scenario.paths.unused.clone());
    let options = ResolveOptions::new().error_on_unused(true);
    let err = create(&scenario, &layers, &options)
        .err()
        .ok_or_else(|| anyhow!("expected unused parameters to abort"))?;
    ensure!(matches!(err, ParamError::UnusedParameters { count: 2 }), "got {err}");
    Ok(())
}

#[rstest]
#[case::yaml("out/params.yaml")]
#[case::json("out/nested/params.json")]
fn saved_output_reloads_identically(scenario: Scenario, #[case] name: &str) -> Result<()> {
    let out = scenario.docs.join(name);
    let options = ResolveOptions::new().out_path(out.clone());
    let resolved = ok(create(&scenario, &scenario.paths.layers(), &options))?;
    let reloaded = Value::Object(ok(load_document(&out))?);
    ensure!(&reloaded == resolved.params(), "saved tree differs: {reloaded}");
    Ok(())
}

#[rstest]
fn resolved_output_is_a_fixed_point(scenario: Scenario) -> Result<()> {
    let out = scenario.docs.join("out/params.yaml");
    let first = ok(create(
        &scenario,
        &scenario.paths.layers(),
        &ResolveOptions::new().out_path(out.clone()),
    ))?;
    let second = ok(create(&scenario, &[out], &ResolveOptions::new()))?;
    ensure!(second.params() == first.params());
    ensure!(second.unused_count() == 0, "got {:?}", second.unused());
    Ok(())
}

#[rstest]
fn missing_documents_are_reported(scenario: Scenario) -> Result<()> {
    let missing = scenario.docs.join("params/absent.yaml");
    let err = create(&scenario, &[missing], &ResolveOptions::new())
        .err()
        .ok_or_else(|| anyhow!("expected a load failure"))?;
    ensure!(matches!(err, ParamError::Document { .. }), "got {err}");
    ensure!(err.key_path().is_none());
    Ok(())
}
