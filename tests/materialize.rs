//! Materializer tests: command sequencing and file handling.

mod support;

use create_secret::core::cluster::ClusterSession;
use create_secret::core::materialize::{self, Materializer};
use create_secret::core::types::{OutputMode, SecretRequest, Target};
use create_secret::error::Error;
use support::*;
use zeroize::Zeroizing;

fn request(targets: &[&str]) -> SecretRequest {
    SecretRequest {
        name: "db-pass".to_string(),
        value: Zeroizing::new("s3cr3t".to_string()),
        targets: targets.iter().map(|t| Target::parse(t, LOCAL_DEV)).collect(),
        mode: OutputMode::Output,
    }
}

#[test]
fn test_remote_pipes_kubectl_into_kubeseal() {
    let repo = Repo::new();
    let request = request(&[STAGING]);
    let dest = repo.layout.output_destination(&request.targets[0], &request.name);
    let mut runner = FakeRunner::new(ORIGINAL_CONTEXT);
    let mut session = ClusterSession::capture(&mut runner, "kubectl");

    let path = Materializer::new(
        &repo.config.tools,
        &repo.config.local_context,
        &repo.layout.scratch_file,
        &mut runner,
    )
    .materialize(&mut session, &request, &dest)
    .unwrap();

    assert_eq!(path, dest.file);
    let create = runner.calls_to("kubectl")[2];
    assert_eq!(
        create.args,
        vec![
            "create",
            "secret",
            "generic",
            "db-pass",
            "--from-literal=db-pass=s3cr3t",
            "--dry-run=client",
            "-o",
            "yaml",
        ]
    );
    let seal = runner.calls_to("kubeseal")[0];
    assert_eq!(seal.args, vec!["-o", "yaml"]);
    assert!(String::from_utf8_lossy(seal.stdin.as_ref().unwrap()).contains("name: db-pass"));

    let written = read_created(&dest.file);
    assert!(written.starts_with("kind: SealedSecret\n"));
}

#[test]
fn test_local_uses_local_context_and_sops() {
    let repo = Repo::new();
    let request = request(&[LOCAL_DEV]);
    let dest = repo.layout.output_destination(&request.targets[0], &request.name);
    let mut runner = FakeRunner::new(ORIGINAL_CONTEXT);
    let mut session = ClusterSession::capture(&mut runner, "kubectl");

    Materializer::new(
        &repo.config.tools,
        &repo.config.local_context,
        &repo.layout.scratch_file,
        &mut runner,
    )
    .materialize(&mut session, &request, &dest)
    .unwrap();

    assert_eq!(session.active(), Some(LOCAL_CONTEXT));
    let sops = runner.calls_to("sops")[0];
    assert_eq!(
        sops.args,
        vec!["-e".to_string(), repo.layout.scratch_file.display().to_string()]
    );
    assert!(dest.file.ends_with("local-dev/db-pass.enc.yaml"));
    read_created(&dest.file);
}

#[test]
fn test_sops_failure_removes_scratch_and_writes_nothing() {
    let repo = Repo::new();
    let request = request(&[LOCAL_DEV]);
    let dest = repo.layout.output_destination(&request.targets[0], &request.name);
    let mut runner = FakeRunner::new(ORIGINAL_CONTEXT).fail_on("sops -e");
    let mut session = ClusterSession::capture(&mut runner, "kubectl");

    let err = Materializer::new(
        &repo.config.tools,
        &repo.config.local_context,
        &repo.layout.scratch_file,
        &mut runner,
    )
    .materialize(&mut session, &request, &dest)
    .unwrap_err();

    assert!(matches!(err, Error::Command(_)));
    assert!(err.to_string().contains("sops -e"));
    assert_absent(&repo.layout.scratch_file);
    assert_absent(&dest.file);
}

#[test]
fn test_environments_run_in_selection_order() {
    let repo = Repo::new();
    let request = request(&[STAGING, LOCAL_DEV]);
    let destinations: Vec<_> = request
        .targets
        .iter()
        .map(|t| repo.layout.output_destination(t, &request.name))
        .collect();
    let mut runner = FakeRunner::new(ORIGINAL_CONTEXT).fail_on("kubeseal");
    let mut session = ClusterSession::capture(&mut runner, "kubectl");

    let outcomes = Materializer::new(
        &repo.config.tools,
        &repo.config.local_context,
        &repo.layout.scratch_file,
        &mut runner,
    )
    .materialize_all(&mut session, &request, &destinations);

    assert_eq!(outcomes.len(), 2);
    assert_eq!(outcomes[0].target.value, STAGING);
    assert!(!outcomes[0].is_ok());
    assert_eq!(outcomes[1].target.value, LOCAL_DEV);
    assert!(outcomes[1].is_ok());
    assert_eq!(runner.switches(), vec![STAGING, LOCAL_CONTEXT]);

    assert!(matches!(
        materialize::summarize(&outcomes),
        Err(Error::Incomplete { failed: 1, total: 2 })
    ));
}
