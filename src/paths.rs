// src/paths.rs

use crate::modes::{Mode, RangePair, Template};
use std::path::{Path, PathBuf};

/// `<base>/csvs/negation_dataset`
pub fn dataset_dir(base_dir: &Path) -> PathBuf {
    base_dir.join("csvs").join("negation_dataset")
}

/// `<base>/csvs/negation_dataset/combined/<mode>.csv`
pub fn output_path(base_dir: &Path, mode: &Mode) -> PathBuf {
    dataset_dir(base_dir)
        .join("combined")
        .join(format!("{}.csv", mode.name))
}

/// Path of the partition holding `pair`, laid out per the mode's template.
pub fn input_path(base_dir: &Path, mode: &Mode, pair: RangePair) -> PathBuf {
    let dir = dataset_dir(base_dir);
    match mode.template {
        Template::Partitioned => dir.join(format!("{}_{}_{}.csv", mode.name, pair.start, pair.end)),
        Template::Validated => dir.join("validated").join(format!(
            "cc12m_images_pos_neg_{}_{}_filtered.csv",
            pair.start, pair.end
        )),
    }
}

/// All partition paths for `mode`, in table order.
pub fn input_paths(base_dir: &Path, mode: &Mode) -> Vec<PathBuf> {
    mode.ranges
        .iter()
        .map(|&pair| input_path(base_dir, mode, pair))
        .collect()
}
