use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use stoic_session::{
    load_image, Delivery, FileStorage, HistoryStore, HttpProxyClient, PendingRequest,
    ProxyClient, ProxyError, SessionController, Ticker,
};

use crate::command::Command;
use crate::render;

type Reply = (PendingRequest, std::result::Result<String, ProxyError>);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Terminal chat loop around one [`SessionController`]
pub struct App {
    controller: SessionController,
    proxy: Arc<dyn ProxyClient>,
    replies_tx: mpsc::Sender<Reply>,
    replies_rx: mpsc::Receiver<Reply>,
    outbox: Vec<String>,
}

impl App {
    /// History under `data_dir`, requests to the proxy at `api_url`
    pub fn open(api_url: &str, data_dir: PathBuf) -> Result<Self> {
        let proxy = HttpProxyClient::new(api_url)
            .context("Failed to create proxy client")?;

        tracing::debug!(data_dir = %data_dir.display(), endpoint = proxy.endpoint(), "Opening session");

        let store = HistoryStore::new(Arc::new(FileStorage::new(data_dir)));
        Ok(Self::new(SessionController::load(store), Arc::new(proxy)))
    }

    pub fn new(controller: SessionController, proxy: Arc<dyn ProxyClient>) -> Self {
        let (replies_tx, replies_rx) = mpsc::channel(8);
        Self {
            controller,
            proxy,
            replies_tx,
            replies_rx,
            outbox: Vec::new(),
        }
    }

    pub fn controller(&self) -> &SessionController {
        &self.controller
    }

    pub async fn run(mut self) -> Result<()> {
        if self.controller.take_guide() {
            self.say(render::GUIDE);
        }
        self.say("StoicAI. Ketik /help untuk daftar perintah.");
        if !self.controller.messages().is_empty() {
            self.say(render::transcript(self.controller.messages()));
        }
        self.flush();

        let (_ticker, mut ticks) = Ticker::every_second();
        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        loop {
            let flow = tokio::select! {
                line = lines.next_line() => match line.context("Failed to read input")? {
                    Some(line) => self.handle(Command::parse(&line)).await,
                    None => Flow::Quit,
                },
                Some(()) = ticks.recv() => {
                    self.on_tick();
                    Flow::Continue
                }
                Some((pending, outcome)) = self.replies_rx.recv() => {
                    self.on_reply(pending, outcome);
                    Flow::Continue
                }
            };

            self.flush();
            if flow == Flow::Quit {
                break;
            }
        }

        Ok(())
    }

    pub async fn handle(&mut self, command: Command) -> Flow {
        match command {
            Command::Message(text) => self.send(text),
            Command::New => {
                self.controller.new_chat();
                self.say("Obrolan baru dimulai.");
            }
            Command::History => {
                let listing = render::history(self.controller.history(), self.controller.current_id());
                self.say(listing);
            }
            Command::Load(n) => self.load(n),
            Command::Delete(n) => self.delete(n),
            Command::Image(path) => self.attach(&path).await,
            Command::Unimage => {
                self.controller.remove_image();
                self.say("Lampiran gambar dihapus.");
            }
            Command::Guide => self.say(render::GUIDE),
            Command::Help => self.say(render::HELP),
            Command::Quit => return Flow::Quit,
            Command::Invalid(reason) => self.say(reason),
        }
        Flow::Continue
    }

    fn send(&mut self, text: String) {
        if self.controller.is_loading() {
            self.say("Masih menunggu balasan...");
            return;
        }
        if !self.controller.is_send_enabled() {
            let status = self
                .controller
                .long_cooldown_notice()
                .unwrap_or_else(|| self.controller.send_label());
            self.say(status);
            return;
        }

        self.controller.set_input(text);
        let Some(pending) = self.controller.begin_send() else {
            return;
        };
        if let Some(notice) = self.controller.long_cooldown_notice() {
            self.say(notice);
        }
        self.say(render::PENDING);

        let proxy = Arc::clone(&self.proxy);
        let replies = self.replies_tx.clone();
        tokio::spawn(async move {
            let outcome = proxy.send(&pending.request).await;
            if replies.send((pending, outcome)).await.is_err() {
                tracing::debug!("Reply arrived after the chat loop ended");
            }
        });
    }

    fn on_reply(&mut self, pending: PendingRequest, outcome: std::result::Result<String, ProxyError>) {
        let session_id = pending.session_id.clone();
        match self.controller.complete(pending, outcome) {
            Delivery::Active => {
                if let Some(reply) = self.controller.messages().last() {
                    let line = render::message(reply);
                    self.say(line);
                }
            }
            Delivery::Background => {
                let title = self
                    .controller
                    .history()
                    .get(&session_id)
                    .map(|s| s.title.clone())
                    .unwrap_or_default();
                self.say(format!("(Balasan baru di obrolan \"{}\")", title));
            }
            Delivery::Dropped => {}
        }
    }

    fn on_tick(&mut self) {
        let was_waiting = !self.controller.throttle().is_clear();
        if self.controller.tick() && was_waiting && self.controller.is_send_enabled() {
            self.say("(Siap mengirim)");
        }
    }

    fn load(&mut self, n: usize) {
        let Some(id) = self.session_id_at(n) else {
            self.say(format!("Tidak ada obrolan nomor {}.", n));
            return;
        };

        match self.controller.load_chat(&id) {
            Ok(()) => {
                let transcript = render::transcript(self.controller.messages());
                self.say(transcript);
            }
            Err(e) => self.say(format!("Gagal memuat obrolan: {}", e)),
        }
    }

    fn delete(&mut self, n: usize) {
        let Some(id) = self.session_id_at(n) else {
            self.say(format!("Tidak ada obrolan nomor {}.", n));
            return;
        };

        let was_active = id == self.controller.current_id();
        if self.controller.delete_chat(&id) {
            self.say("Obrolan dihapus.");
            if was_active {
                self.say("Obrolan baru dimulai.");
            }
        }
    }

    async fn attach(&mut self, path: &Path) {
        match load_image(path).await {
            Ok(data_uri) => {
                self.controller.attach_image(data_uri);
                self.say(format!("Gambar terlampir: {}", path.display()));
            }
            Err(e) => self.say(format!("Gagal memuat gambar: {}", e)),
        }
    }

    fn session_id_at(&self, n: usize) -> Option<String> {
        let index = n.checked_sub(1)?;
        self.controller
            .history()
            .sessions()
            .get(index)
            .map(|s| s.id.clone())
    }

    fn say(&mut self, line: impl Into<String>) {
        self.outbox.push(line.into());
    }

    fn flush(&mut self) {
        for line in self.outbox.drain(..) {
            println!("{}\n", line);
        }
    }
}
