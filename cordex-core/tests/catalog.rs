//! Catalog operations on a temporary CORDEX-style directory tree.

use cordex_core::catalog::{
    available_complementary_variables, count_auxiliary_variables, folder_tree,
    sort_model_files, sort_model_files_by_folder, Availability, CatalogConfig, DatasetName,
};
use cordex_core::registry::{ModelKey, ModelRegistry};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const REMO: &str = "SAM-44_MPI-M-MPI-ESM-LR_historical_r1i1p1_REMO2009_v1";
const RCA: &str = "SAM-44_ICHEC-EC-EARTH_historical_r12i1p1_SMHI-RCA4_v3";
const CCLM: &str = "SAM-44_MOHC-HadGEM2-ES_historical_r1i1p1_CLMcom-CCLM4-8-17_v1";

fn dataset_dir(root: &Path, variable: &str, key: &str) {
    let dir = root
        .join("historical")
        .join(variable)
        .join(format!("{}_{}_mon", variable, key));
    fs::create_dir_all(dir).unwrap();
}

/// huss for all three simulations, tas for two, pr for one
fn cordex_tree() -> TempDir {
    let tmp = tempfile::tempdir().unwrap();
    for key in [REMO, RCA, CCLM] {
        dataset_dir(tmp.path(), "huss", key);
    }
    dataset_dir(tmp.path(), "tas", REMO);
    dataset_dir(tmp.path(), "tas", RCA);
    dataset_dir(tmp.path(), "pr", REMO);
    // stray file next to the dataset folders
    fs::write(
        tmp.path().join("historical").join("huss").join("README"),
        b"",
    )
    .unwrap();
    tmp
}

fn config(root: &Path, complementary: &[&str]) -> CatalogConfig {
    CatalogConfig {
        root: root.to_path_buf(),
        complementary_variables: complementary.iter().map(|v| v.to_string()).collect(),
        ..Default::default()
    }
}

#[test]
fn availability_groups_by_count() {
    let tmp = cordex_tree();
    let table = available_complementary_variables(&config(tmp.path(), &["tas", "pr"])).unwrap();

    assert_eq!(table.keys().copied().collect::<Vec<_>>(), vec![0, 1, 2]);
    assert_eq!(
        table[&2],
        vec![Availability {
            dataset: REMO.to_string(),
            variables: vec!["tas".to_string(), "pr".to_string()],
        }]
    );
    assert_eq!(
        table[&1],
        vec![Availability {
            dataset: RCA.to_string(),
            variables: vec!["tas".to_string()],
        }]
    );
    assert_eq!(table[&0][0].dataset, CCLM);
    assert!(table[&0][0].variables.is_empty());
}

#[test]
fn missing_complementary_folder_counts_as_unavailable() {
    let tmp = cordex_tree();
    let table =
        available_complementary_variables(&config(tmp.path(), &["tas", "sfcWind"])).unwrap();

    let total: usize = table.values().map(Vec::len).sum();
    assert_eq!(total, 3);
    assert!(table
        .values()
        .flatten()
        .all(|a| !a.variables.contains(&"sfcWind".to_string())));
}

#[test]
fn availability_without_complementary_variables() {
    let tmp = cordex_tree();
    let table = available_complementary_variables(&config(tmp.path(), &[])).unwrap();

    assert_eq!(table.len(), 1);
    assert_eq!(table[&0].len(), 3);
}

#[test]
fn auxiliary_variables_per_model_folder() {
    let tmp = tempfile::tempdir().unwrap();
    let base = tmp.path().join("cordex_models").join("historical");
    for dir in [
        "REMO2009_huss/huss",
        "REMO2009_huss/tas",
        "REMO2009_huss/pr",
        "RCA4_huss/huss",
        "RCA4_huss/tas",
        "CCLM_huss",
        "unrelated/tas",
    ] {
        fs::create_dir_all(base.join(dir)).unwrap();
    }

    let counts = count_auxiliary_variables(tmp.path().join("cordex_models"), "huss").unwrap();

    assert_eq!(counts[&2], vec!["REMO2009_huss".to_string()]);
    assert_eq!(counts[&1], vec!["RCA4_huss".to_string()]);
    // the inner `huss` folders match too, and have no sub-folders
    assert_eq!(
        counts[&0],
        vec![
            "CCLM_huss".to_string(),
            "huss".to_string(),
            "huss".to_string()
        ]
    );
}

#[test]
fn sorting_moves_files_into_model_folders() {
    let tmp = tempfile::tempdir().unwrap();
    let files = [
        "huss_SAM-44_MPI-M-MPI-ESM-LR_historical_r1i1p1_REMO2009_v1_mon_195101-195512.nc",
        "huss_SAM-44_MPI-M-MPI-ESM-LR_historical_r1i1p1_REMO2009_v1_mon_195601-196012.nc",
        "tas_SAM-44_ICHEC-EC-EARTH_historical_r12i1p1_SMHI-RCA4_v3_mon_195101-196012.nc",
        "notes.txt",
    ];
    for file in files {
        fs::write(tmp.path().join(file), b"").unwrap();
    }

    let report = sort_model_files_by_folder(tmp.path(), ".nc").unwrap();

    assert_eq!(report.moved.len(), 3);
    assert!(report.skipped.is_empty());

    let remo_dir = tmp
        .path()
        .join("huss_SAM-44_MPI-M-MPI-ESM-LR_historical_r1i1p1_REMO2009_v1_mon");
    assert!(remo_dir.join(files[0]).is_file());
    assert!(remo_dir.join(files[1]).is_file());
    assert!(tmp
        .path()
        .join("tas_SAM-44_ICHEC-EC-EARTH_historical_r12i1p1_SMHI-RCA4_v3_mon")
        .join(files[2])
        .is_file());
    assert!(tmp.path().join("notes.txt").is_file());
    assert!(!tmp.path().join(files[0]).exists());

    // Sorted folders are left alone by a second pass
    let again = sort_model_files_by_folder(tmp.path(), "nc").unwrap();
    assert!(again.is_empty());
}

#[test]
fn sorting_skips_files_without_model_name() {
    let tmp = tempfile::tempdir().unwrap();
    fs::write(tmp.path().join("orography.nc"), b"").unwrap();

    let report = sort_model_files_by_folder(tmp.path(), "nc").unwrap();

    assert!(report.moved.is_empty());
    assert_eq!(report.skipped, vec!["orography.nc".to_string()]);
    assert!(tmp.path().join("orography.nc").is_file());
}

#[test]
fn sorting_follows_configured_extension() {
    let tmp = tempfile::tempdir().unwrap();
    let nc4 = "pr_SAM-44_MPI-M-MPI-ESM-LR_historical_r1i1p1_REMO2009_v1_mon_195101-195512.nc4";
    let nc = "pr_SAM-44_MPI-M-MPI-ESM-LR_historical_r1i1p1_REMO2009_v1_mon_195601-196012.nc";
    fs::write(tmp.path().join(nc4), b"").unwrap();
    fs::write(tmp.path().join(nc), b"").unwrap();

    let config = CatalogConfig {
        extension: "nc4".to_string(),
        ..config(tmp.path(), &[])
    };
    let report = sort_model_files(tmp.path(), &config).unwrap();

    assert_eq!(report.moved.len(), 1);
    assert_eq!(report.moved[0].file, nc4);
    assert!(tmp.path().join(&report.moved[0].model).join(nc4).is_file());
    assert!(tmp.path().join(nc).is_file());
}

#[test]
fn tree_of_catalog() {
    let tmp = cordex_tree();
    let tree = folder_tree(tmp.path().join("historical")).unwrap();
    let lines: Vec<&str> = tree.lines().collect();

    assert_eq!(lines[0], "historical/");
    assert_eq!(lines[1], "    huss/");
    // ICHEC sorts before MOHC and MPI-M
    assert_eq!(lines[2], format!("        huss_{}_mon/", RCA));
    assert_eq!(lines.len(), 1 + 3 + 3 + 1 + 2);
}

#[test]
fn registry_from_catalog_folders() {
    let tmp = cordex_tree();
    let huss_dir = tmp.path().join("historical").join("huss");

    let keys: Vec<ModelKey> = fs::read_dir(&huss_dir)
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().is_dir())
        .filter_map(|e| DatasetName::parse(&e.file_name().to_string_lossy()).ok())
        .filter_map(|name| ModelKey::from_dataset(&name))
        .collect();
    let registry = ModelRegistry::from_keys(keys);

    assert_eq!(registry.len(), 3);
    assert!(registry
        .get("REMO2009_MPI-M-MPI-ESM-LR_SAM-44")
        .is_some());
    assert!(registry.get("SMHI-RCA4_ICHEC-EC-EARTH_SAM-44").is_some());
    assert!(registry
        .get("CLMcom-CCLM4-8-17_MOHC-HadGEM2-ES_SAM-44")
        .is_some());
}
