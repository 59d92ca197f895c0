use crate::common::TestProject;

#[test]
fn test_graph_defaults_to_cluster_id() {
    let project = TestProject::new().unwrap();

    let output = project.run_assetgraph(&["graph"]).unwrap();
    output.assert_success();
    assert_eq!(output.stdout, "Cluster ID\n└── Install Config\n");
}

#[test]
fn test_graph_order() {
    let project = TestProject::new().unwrap();

    let output = project.run_assetgraph(&["graph", "cluster-id", "--order"]).unwrap();
    output.assert_success();
    assert_eq!(output.stdout, "Install Config\nCluster ID\n");
}

#[test]
fn test_graph_does_not_need_install_config() {
    let project = TestProject::new().unwrap();

    let output = project.run_assetgraph(&["graph", "install-config"]).unwrap();
    output.assert_success().assert_stdout_contains("Install Config");
}

#[test]
fn test_graph_rejects_unknown_target() {
    let project = TestProject::new().unwrap();

    let output = project.run_assetgraph(&["graph", "bootstrap"]).unwrap();
    output.assert_code(2).assert_stderr_contains("invalid value");
}
