use assert_cmd::assert::Assert;
use assert_cmd::prelude::*;
use predicates::prelude::*;

use crate::common::TestProject;

fn run(args: &[&str]) -> Assert {
    let project = TestProject::new().unwrap();
    project.command().arg("infra-id").args(args).assert()
}

#[test]
fn test_infra_id_default_length() {
    run(&["my-cluster"])
        .success()
        .stdout(predicate::str::is_match(r"^my-cluster-[a-z0-9]{5}\n$").unwrap());
}

#[test]
fn test_infra_id_gcp_truncates() {
    run(&["My_Cluster!!", "--platform", "gcp"])
        .success()
        .stdout(predicate::str::is_match(r"^My-Clu-[a-z0-9]{5}\n$").unwrap());
}

#[test]
fn test_infra_id_empty_name() {
    run(&[""]).success().stdout(predicate::str::is_match(r"^-[a-z0-9]{5}\n$").unwrap());
}

#[test]
fn test_infra_id_explicit_max_len() {
    run(&["abcdefghij", "--max-len", "8"])
        .success()
        .stdout(predicate::str::is_match(r"^ab-[a-z0-9]{5}\n$").unwrap());
}

#[test]
fn test_infra_id_max_len_too_small_is_usage_error() {
    run(&["prod", "--max-len", "5"])
        .code(2)
        .stderr(predicate::str::contains("at least 6"));
}

#[test]
fn test_infra_id_platform_conflicts_with_max_len() {
    run(&["prod", "--platform", "aws", "--max-len", "10"])
        .code(2)
        .stderr(predicate::str::contains("cannot be used with"));
}
