//! Profiles and plans on disk: TOML round-trips, file-based profiles
//! plan identically to their built-in originals, and saved plans read back.

use choreo_harness::config::{ConfigError, Profile, BUILTIN_PROFILES};
use choreo_harness::plan_dir::{read_plan, write_plan, DEFAULT_PLAN_FILENAME};
use choreo_harness::runner::{run, run_profile, RunError};

#[test]
fn builtin_profiles_round_trip_through_files() {
    let dir = tempfile::tempdir().unwrap();
    for name in BUILTIN_PROFILES {
        let profile = Profile::builtin(name).unwrap();
        let path = dir.path().join(format!("{name}.toml"));
        std::fs::write(&path, profile.to_toml_string().unwrap()).unwrap();

        let loaded = Profile::load(&path).unwrap();
        assert_eq!(loaded, profile);
        assert_eq!(loaded.digest().unwrap(), profile.digest().unwrap());
    }
}

#[test]
fn file_profile_plans_like_builtin() {
    let dir = tempfile::tempdir().unwrap();
    let mut profile = Profile::builtin("classic").unwrap();
    profile.budget.max_expansions = 300;
    let path = dir.path().join("classic_small.toml");
    std::fs::write(&path, profile.to_toml_string().unwrap()).unwrap();

    let from_file = run(path.to_str().unwrap()).unwrap();
    let in_memory = run_profile(profile).unwrap();
    assert_eq!(from_file.graph_digest, in_memory.graph_digest);
    assert_eq!(from_file.report, in_memory.report);
}

#[test]
fn saved_plan_reads_back_and_digest_matches() {
    let dir = tempfile::tempdir().unwrap();
    let mut profile = Profile::builtin("ranged").unwrap();
    profile.budget.max_expansions = 500;
    let plan = run_profile(profile).unwrap();
    let best = plan.report.best.as_ref().unwrap();

    let path = dir.path().join(DEFAULT_PLAN_FILENAME);
    let digest = write_plan(&best.record, &path).unwrap();
    let back = read_plan(&path).unwrap();
    assert_eq!(back, best.record);
    assert_eq!(back.digest().unwrap(), digest);

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(json["goals_completed"], 11);
    assert_eq!(json["target_time"], 110.0);
    assert!(json["sequence"].as_array().unwrap().len() >= 11);
}

#[test]
fn malformed_profile_file_is_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.toml");
    std::fs::write(&path, "name = \"broken\"\ngoals = [\"A\"\n").unwrap();
    let err = run(path.to_str().unwrap()).unwrap_err();
    assert!(matches!(err, RunError::Config(ConfigError::Parse(_))), "{err}");
}

#[test]
fn profile_with_unreachable_goal_reports_no_solution() {
    let text = r#"
name = "stuck"
goals = ["A", "B"]

[timing]
target_time = 10.0
default_duration = 1.0

[moves.A]
predecessors = ["START"]

[moves.B]
predecessors = []
"#;
    let plan = run_profile(Profile::from_toml_str(text).unwrap()).unwrap();
    assert!(plan.report.best.is_none());
    assert!(plan.report.render().contains("No solution found"));
}
