// src/simulation/control.rs

use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Condvar, Mutex, MutexGuard};

use tracing::debug;

/// フラグ変更の通知
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlEvent {
    CalculatingChanged(bool),
    StopChanged(bool),
}

#[derive(Debug, Default)]
struct ControlFlags {
    calculating: bool,
    stop: bool,
}

/// 計算の実行状態を外部（UI 側）から制御するためのフラグ
///
/// `Arc<RunController>` としてスレッド間で共有する。
#[derive(Debug, Default)]
pub struct RunController {
    flags: Mutex<ControlFlags>,
    idle: Condvar,
    subscribers: Mutex<Vec<Sender<ControlEvent>>>,
}

impl RunController {
    pub fn new() -> Self {
        RunController::default()
    }

    fn flags(&self) -> MutexGuard<'_, ControlFlags> {
        // フラグは bool のみなので poison されても値は使える
        self.flags.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// フラグ変更通知を受け取るチャネルを登録する
    pub fn subscribe(&self) -> Receiver<ControlEvent> {
        let (tx, rx) = channel();
        self.subscribers
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(tx);
        rx
    }

    fn notify(&self, event: ControlEvent) {
        debug!(?event, "制御フラグが変更されました");
        let mut subscribers = self.subscribers.lock().unwrap_or_else(|e| e.into_inner());
        // 受信側が破棄されたチャネルは取り除く
        subscribers.retain(|tx| tx.send(event).is_ok());
    }

    pub fn calculating(&self) -> bool {
        self.flags().calculating
    }

    /// 値が変わったときだけ通知する
    pub fn set_calculating(&self, calculating: bool) {
        {
            let mut flags = self.flags();
            if flags.calculating == calculating {
                return;
            }
            flags.calculating = calculating;
        }
        if !calculating {
            self.idle.notify_all();
        }
        self.notify(ControlEvent::CalculatingChanged(calculating));
    }

    pub fn stop_requested(&self) -> bool {
        self.flags().stop
    }

    pub fn set_stop(&self, stop: bool) {
        {
            let mut flags = self.flags();
            if flags.stop == stop {
                return;
            }
            flags.stop = stop;
        }
        self.notify(ControlEvent::StopChanged(stop));
    }

    /// `calculating` が解除されるまでブロックする
    pub fn wait_until_idle(&self) {
        let guard = self.flags();
        let _guard = self
            .idle
            .wait_while(guard, |flags| flags.calculating)
            .unwrap_or_else(|e| e.into_inner());
    }
}
