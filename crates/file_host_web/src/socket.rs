//! Browser WebSocket wrapper for the workspace change feed.
//!
//! The feed owns its event closures; dropping it detaches them and closes the socket.

use file_host::KEEPALIVE_PING;

/// Callbacks invoked from socket events.
pub struct ChangeFeedHandlers {
    /// Connection established.
    pub on_open: Box<dyn FnMut()>,
    /// Text frame received.
    pub on_message: Box<dyn FnMut(String)>,
    /// Transport error.
    pub on_error: Box<dyn FnMut()>,
    /// Connection closed, with close code and reason.
    pub on_close: Box<dyn FnMut(u16, String)>,
}

#[cfg(target_arch = "wasm32")]
mod imp {
    use wasm_bindgen::closure::Closure;
    use wasm_bindgen::JsCast;
    use web_sys::{CloseEvent, Event, MessageEvent, WebSocket};

    use super::ChangeFeedHandlers;

    pub struct Socket {
        ws: WebSocket,
        _on_open: Closure<dyn FnMut(Event)>,
        _on_message: Closure<dyn FnMut(MessageEvent)>,
        _on_error: Closure<dyn FnMut(Event)>,
        _on_close: Closure<dyn FnMut(CloseEvent)>,
    }

    impl Socket {
        pub fn connect(url: &str, handlers: ChangeFeedHandlers) -> Result<Self, String> {
            let ws = WebSocket::new(url).map_err(|e| format!("websocket open failed: {e:?}"))?;
            let ChangeFeedHandlers {
                mut on_open,
                mut on_message,
                mut on_error,
                mut on_close,
            } = handlers;

            let open = Closure::<dyn FnMut(Event)>::new(move |_| on_open());
            let message = Closure::<dyn FnMut(MessageEvent)>::new(move |ev: MessageEvent| {
                if let Some(text) = ev.data().as_string() {
                    on_message(text);
                }
            });
            let error = Closure::<dyn FnMut(Event)>::new(move |_| on_error());
            let close = Closure::<dyn FnMut(CloseEvent)>::new(move |ev: CloseEvent| {
                on_close(ev.code(), ev.reason());
            });

            ws.set_onopen(Some(open.as_ref().unchecked_ref()));
            ws.set_onmessage(Some(message.as_ref().unchecked_ref()));
            ws.set_onerror(Some(error.as_ref().unchecked_ref()));
            ws.set_onclose(Some(close.as_ref().unchecked_ref()));

            Ok(Self {
                ws,
                _on_open: open,
                _on_message: message,
                _on_error: error,
                _on_close: close,
            })
        }

        pub fn is_open(&self) -> bool {
            self.ws.ready_state() == WebSocket::OPEN
        }

        pub fn send_text(&self, text: &str) -> Result<(), String> {
            self.ws
                .send_with_str(text)
                .map_err(|e| format!("websocket send failed: {e:?}"))
        }

        pub fn close(&self) {
            let _ = self.ws.close();
        }
    }

    impl Drop for Socket {
        fn drop(&mut self) {
            self.ws.set_onopen(None);
            self.ws.set_onmessage(None);
            self.ws.set_onerror(None);
            self.ws.set_onclose(None);
            let _ = self.ws.close();
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod imp {
    use super::ChangeFeedHandlers;

    pub struct Socket;

    impl Socket {
        pub fn connect(_url: &str, _handlers: ChangeFeedHandlers) -> Result<Self, String> {
            Err("websocket unavailable on this target".to_string())
        }

        pub fn is_open(&self) -> bool {
            false
        }

        pub fn send_text(&self, _text: &str) -> Result<(), String> {
            Err("websocket unavailable on this target".to_string())
        }

        pub fn close(&self) {}
    }
}

/// Live connection to the `/ws` change feed.
pub struct ChangeFeed {
    socket: imp::Socket,
}

impl ChangeFeed {
    /// Opens the socket and wires `handlers` to its events.
    ///
    /// # Errors
    ///
    /// Returns an error when the socket cannot be constructed (bad URL, unsupported target).
    pub fn connect(url: &str, handlers: ChangeFeedHandlers) -> Result<Self, String> {
        imp::Socket::connect(url, handlers).map(|socket| Self { socket })
    }

    /// `true` while the socket is in the OPEN state.
    pub fn is_open(&self) -> bool {
        self.socket.is_open()
    }

    /// Sends the keep-alive ping when the socket is open. Returns whether a ping was sent.
    ///
    /// # Errors
    ///
    /// Returns an error when the browser rejects the send.
    pub fn send_ping(&self) -> Result<bool, String> {
        if !self.is_open() {
            return Ok(false);
        }
        self.socket.send_text(KEEPALIVE_PING).map(|()| true)
    }

    /// Closes the socket. Handlers stay attached until the feed is dropped.
    pub fn close(&self) {
        self.socket.close();
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    fn quiet_handlers() -> ChangeFeedHandlers {
        ChangeFeedHandlers {
            on_open: Box::new(|| {}),
            on_message: Box::new(|_| {}),
            on_error: Box::new(|| {}),
            on_close: Box::new(|_, _| {}),
        }
    }

    #[test]
    fn native_target_reports_unavailable() {
        let err = ChangeFeed::connect("ws://localhost/ws", quiet_handlers())
            .err()
            .expect("connect should fail off-browser");
        assert!(err.contains("unavailable"));
    }
}
