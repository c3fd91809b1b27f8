/// Reports lifecycle changes to systemd when running as a `Type=notify` unit.
#[derive(Debug)]
pub struct ProcessState {
    pub span: tracing::Span,
}

impl ProcessState {
    pub fn set_running(&self) {
        self.notify_logged("ready", &[NotifyState::Ready]);
    }

    pub fn set_stopping(&self) {
        self.notify_logged("stopping", &[NotifyState::Stopping]);
    }

    pub fn set_failed(&self) {
        self.notify_logged(
            "failed,stopping",
            &[NotifyState::Status("failed"), NotifyState::Stopping],
        );
    }

    fn notify_logged(&self, status: &str, states: &[NotifyState<'_>]) {
        tracing::debug!(parent: &self.span, status, "Setting service status");
        match notify(states) {
            Ok(true) => {
                tracing::info!(parent: &self.span, status, "Notified systemd of service status")
            }
            Ok(false) => {}
            Err(error) => {
                tracing::error!(parent: &self.span, ?error, "Failed to notify systemd of state change")
            }
        }
    }
}

#[derive(Clone, Debug)]
enum NotifyState<'a> {
    Ready,
    Stopping,
    Status(&'a str),
}

impl std::fmt::Display for NotifyState<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NotifyState::Ready => write!(f, "READY=1"),
            NotifyState::Stopping => write!(f, "STOPPING=1"),
            NotifyState::Status(msg) => write!(f, "STATUS={msg}"),
        }
    }
}

fn message(states: &[NotifyState<'_>]) -> String {
    states.iter().map(|state| format!("{state}\n")).collect()
}

/// Returns `Ok(false)` when not started by systemd.
fn notify(states: &[NotifyState<'_>]) -> std::io::Result<bool> {
    let Some(socket_path) = std::env::var_os("NOTIFY_SOCKET") else {
        return Ok(false);
    };

    let sock = std::os::unix::net::UnixDatagram::unbound()?;
    sock.connect(socket_path)?;

    let msg = message(states);
    let len = sock.send(msg.as_bytes())?;

    if len != msg.len() {
        return Err(std::io::Error::new(
            std::io::ErrorKind::WriteZero,
            "incomplete write",
        ));
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::message;
    use super::NotifyState;

    #[test]
    fn test_message() {
        assert_eq!(message(&[NotifyState::Ready]), "READY=1\n");
        assert_eq!(
            message(&[NotifyState::Status("failed"), NotifyState::Stopping]),
            "STATUS=failed\nSTOPPING=1\n"
        );
    }
}
