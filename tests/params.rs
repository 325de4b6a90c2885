use std::io::Write;

use mpiam::{EconomyEnv, Error, Params};
use tempfile::NamedTempFile;

mod common;
use common::{reference_params, reference_params_path};

fn reference_yaml() -> String {
    std::fs::read_to_string(reference_params_path()).unwrap()
}

fn write_temp(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

/// The reference document with the line defining `key` removed.
fn without_key(key: &str) -> String {
    reference_yaml()
        .lines()
        .filter(|line| !line.starts_with(&format!("{key}:")))
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn reference_file_maps_model_keys() {
    let params = reference_params();
    assert_eq!(params.output_scale, 100.0);
    assert_eq!(params.pollution_floor, 280.0);
    assert_eq!(params.risk_aversion, 1.5);
    assert_eq!(params.get("M_tilde"), Some(280.0));
    assert_eq!(params.get("delta_K"), Some(0.05));
    assert_eq!(params.get("unknown"), None);
    assert_eq!(params.entries().len(), 23);
}

#[test]
fn every_key_is_required() {
    let params = reference_params();
    for (key, _) in params.entries() {
        let err = Params::from_yaml_str(&without_key(key)).unwrap_err();
        match err {
            Error::ParamsParse(e) => assert!(
                e.to_string().contains(&format!("missing field `{key}`")),
                "{key}: {e}"
            ),
            other => panic!("{key}: unexpected error {other}"),
        }
    }
}

#[test]
fn unknown_keys_are_ignored() {
    let yaml = format!("{}\nnotes: 42\n", reference_yaml());
    assert_eq!(Params::from_yaml_str(&yaml).unwrap(), reference_params());
}

#[test]
fn integer_values_are_accepted() {
    let yaml = reference_yaml().replace("Y: 100.0", "Y: 100");
    assert_eq!(Params::from_yaml_str(&yaml).unwrap().output_scale, 100.0);
}

#[test]
fn non_finite_values_are_rejected() {
    let yaml = reference_yaml().replace("mu: 0.05", "mu: .nan");
    let err = Params::from_yaml_str(&yaml).unwrap_err();
    assert!(
        matches!(err, Error::InvalidParameter { name: "mu", .. }),
        "{err}"
    );
}

#[test]
fn unit_risk_aversion_is_rejected() {
    let yaml = reference_yaml().replace("sigma: 1.5", "sigma: 1.0");
    let err = Params::from_yaml_str(&yaml).unwrap_err();
    assert!(
        matches!(err, Error::InvalidParameter { name: "sigma", .. }),
        "{err}"
    );
}

#[test]
fn malformed_documents_fail() {
    assert!(matches!(
        Params::from_yaml_str("Y: [1, 2"),
        Err(Error::ParamsParse(_))
    ));
    assert!(matches!(
        Params::from_yaml_str(&reference_yaml().replace("psi: 10.0", "psi: lots")),
        Err(Error::ParamsParse(_))
    ));
}

#[test]
fn files_on_disk_load_and_fail_fast() {
    let file = write_temp(&reference_yaml());
    assert_eq!(Params::from_yaml_file(file.path()).unwrap(), reference_params());

    let broken = write_temp(&without_key("rho"));
    assert!(EconomyEnv::from_yaml_file(broken.path()).is_err());

    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.yaml");
    let err = EconomyEnv::from_yaml_file(&missing).unwrap_err();
    assert!(matches!(err, Error::ParamsRead { .. }), "{err}");
    assert!(err.to_string().contains("absent.yaml"));
}
