// src/simulation/load_parameters.rs

use std::fs;
use std::path::Path;

use serde_yaml::from_str;

use crate::config::RunParameters;
use crate::error::SimError;

/// 計算パラメータの読み込み
///
/// 拡張子が `.yaml` / `.yml` なら YAML、それ以外は空白区切りの数値列
/// （`h L Ne Ar Ai delta show_phase_space show_trajectories` の順）として読む。
pub fn load_parameters<P: AsRef<Path>>(path: P) -> Result<RunParameters, SimError> {
    let path = path.as_ref();
    let unreadable = |reason: String| SimError::ConfigurationUnreadable {
        path: path.display().to_string(),
        reason,
    };

    let contents = fs::read_to_string(path).map_err(|e| unreadable(e.to_string()))?;

    let is_yaml = matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("yaml") | Some("yml")
    );
    if is_yaml {
        from_str(&contents).map_err(|e| unreadable(e.to_string()))
    } else {
        parse_whitespace_parameters(&contents).map_err(unreadable)
    }
}

/// 空白区切りのパラメータ列を解析する
///
/// 末尾の表示フラグは省略可能（省略時は false）。
pub fn parse_whitespace_parameters(contents: &str) -> Result<RunParameters, String> {
    let mut tokens = contents.split_whitespace();

    let mut next_f64 = |name: &str| -> Result<f64, String> {
        let token = tokens.next().ok_or_else(|| format!("{} がありません", name))?;
        token
            .parse::<f64>()
            .map_err(|e| format!("{} を数値として読めません ({}): {}", name, token, e))
    };

    let h = next_f64("h")?;
    let length = next_f64("L")?;
    let electrons_raw = next_f64("Ne")?;
    let ar = next_f64("Ar")?;
    let ai = next_f64("Ai")?;
    let delta = next_f64("delta")?;

    if electrons_raw.fract() != 0.0 || !electrons_raw.is_finite() {
        return Err(format!("Ne は整数でなければなりません ({})", electrons_raw));
    }
    let electrons = electrons_raw as i64;

    let show_phase_space = parse_flag(tokens.next(), "show_phase_space")?;
    let show_trajectories = parse_flag(tokens.next(), "show_trajectories")?;

    Ok(RunParameters {
        h,
        length,
        electrons,
        ar,
        ai,
        delta,
        show_phase_space,
        show_trajectories,
    })
}

fn parse_flag(token: Option<&str>, name: &str) -> Result<bool, String> {
    match token {
        None => Ok(false),
        Some("1") | Some("true") => Ok(true),
        Some("0") | Some("false") => Ok(false),
        Some(other) => Err(format!("{} は 0/1/true/false のいずれかです ({})", name, other)),
    }
}
