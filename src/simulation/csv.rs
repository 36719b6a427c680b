// src/simulation/csv.rs

use std::f64::consts::TAU;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::info;

use crate::error::SimError;
use crate::models::EnsembleState;
use crate::simulation::observer::StepObserver;

/// CSVヘッダーの書き込み
pub fn write_csv_header<W: Write>(writer: &mut W, state: &EnsembleState) -> Result<(), std::io::Error> {
    let mut header = String::from("z");

    for k in 0..state.electrons() {
        header.push_str(&format!(",th_{}", k));
    }
    for k in 0..state.electrons() {
        header.push_str(&format!(",dthdz_{}", k));
    }

    header.push('\n');
    writer.write_all(header.as_bytes())?;
    Ok(())
}

/// CSV行の作成（格子点 `index` の全電子）
pub fn create_csv_row(state: &EnsembleState, index: usize) -> String {
    let mut row = format!("{}", state.z(index));

    for theta in state.driven().theta.row(index) {
        row.push_str(&format!(",{}", theta));
    }
    for dtheta in state.driven().dtheta.row(index) {
        row.push_str(&format!(",{}", dtheta));
    }

    row.push('\n');
    row
}

/// 電子軌道 θ(z), dθ/dz(z) を 1 ステップごとに書き出す
pub struct TrajectoryCsv<W: Write> {
    writer: W,
}

impl TrajectoryCsv<Box<dyn Write>> {
    /// ファイルを作成する（ヘッダーは計算開始時に書く）
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self, SimError> {
        let file = File::create(path.as_ref())?;
        let writer: Box<dyn Write> = Box::new(BufWriter::new(file));
        Ok(TrajectoryCsv::new(writer))
    }
}

impl<W: Write> TrajectoryCsv<W> {
    pub fn new(writer: W) -> Self {
        TrajectoryCsv { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> StepObserver for TrajectoryCsv<W> {
    fn on_start(&mut self, state: &EnsembleState) -> Result<(), SimError> {
        write_csv_header(&mut self.writer, state)?;
        self.writer.write_all(create_csv_row(state, 0).as_bytes())?;
        Ok(())
    }

    fn on_step(&mut self, index: usize, state: &EnsembleState) -> Result<(), SimError> {
        self.writer.write_all(create_csv_row(state, index).as_bytes())?;
        Ok(())
    }

    fn on_finished(&mut self, _state: &EnsembleState) -> Result<(), SimError> {
        self.writer.flush()?;
        Ok(())
    }
}

/// 計算完了時の位相空間（最終格子点の θ, dθ/dz）を書き出す
pub struct PhaseSpaceCsv<W: Write> {
    writer: W,
}

impl PhaseSpaceCsv<Box<dyn Write>> {
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self, SimError> {
        let file = File::create(path.as_ref())?;
        let writer: Box<dyn Write> = Box::new(BufWriter::new(file));
        Ok(PhaseSpaceCsv::new(writer))
    }
}

impl<W: Write> PhaseSpaceCsv<W> {
    pub fn new(writer: W) -> Self {
        PhaseSpaceCsv { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> StepObserver for PhaseSpaceCsv<W> {
    fn on_step(&mut self, _index: usize, _state: &EnsembleState) -> Result<(), SimError> {
        Ok(())
    }

    fn on_finished(&mut self, state: &EnsembleState) -> Result<(), SimError> {
        let last = state.nz() - 1;
        let thetas = state.driven().theta.row(last);
        let dthetas = state.driven().dtheta.row(last);

        self.writer.write_all(b"k,theta,theta_mod_2pi,dthdz\n")?;
        for (k, (theta, dtheta)) in thetas.iter().zip(dthetas).enumerate() {
            let row = format!("{},{},{},{}\n", k, theta, theta.rem_euclid(TAU), dtheta);
            self.writer.write_all(row.as_bytes())?;
        }
        self.writer.flush()?;

        info!(z = state.z(last), "位相空間を書き出しました");
        Ok(())
    }
}
