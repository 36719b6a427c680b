// src/cli.rs

use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(
    name = "rknsim",
    about = "電子アンサンブルの位相方程式を予測子・修正子法で積分する",
    version
)]
pub struct Args {
    /// パラメータファイル（.yaml / .yml または空白区切りの input.dat 形式）
    #[arg(default_value = "input.yaml")]
    pub config: PathBuf,

    /// CSV の出力先ディレクトリ
    #[arg(default_value = "output")]
    pub output_dir: PathBuf,
}
