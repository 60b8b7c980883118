use tokio::sync::mpsc::{self, error::SendError, UnboundedReceiver, UnboundedSender};

/// Messages adapters push into the store. The teacher of this pattern
/// is a polled std channel; a headless engine has no tick loop, so the
/// bus is an async channel drained by a facade-owned pump task.
#[derive(Debug)]
pub enum WorkbenchMessage {
    Action(crate::kernel::Action),
}

#[derive(Clone)]
pub struct WorkbenchBusSender {
    tx: UnboundedSender<WorkbenchMessage>,
}

pub struct WorkbenchBusReceiver {
    rx: UnboundedReceiver<WorkbenchMessage>,
}

pub fn workbench_bus() -> (WorkbenchBusSender, WorkbenchBusReceiver) {
    let (tx, rx) = mpsc::unbounded_channel();
    (WorkbenchBusSender { tx }, WorkbenchBusReceiver { rx })
}

impl WorkbenchBusSender {
    pub fn send(&self, msg: WorkbenchMessage) -> Result<(), SendError<WorkbenchMessage>> {
        self.tx.send(msg)
    }

    pub fn send_action(
        &self,
        action: crate::kernel::Action,
    ) -> Result<(), SendError<WorkbenchMessage>> {
        self.send(WorkbenchMessage::Action(action))
    }
}

impl WorkbenchBusReceiver {
    pub async fn recv(&mut self) -> Option<WorkbenchMessage> {
        self.rx.recv().await
    }
}
