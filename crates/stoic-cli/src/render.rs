//! Plain-text rendering of controller state.

use stoic_session::{ChatHistory, Message, Role};

pub const GUIDE: &str = "\
Panduan Penggunaan StoicAI

Selamat datang di StoicAI, asisten AI yang dirancang khusus untuk membantu Anda
memahami dan menerapkan filosofi Stoa.

Fitur Utama:
  - Riwayat Obrolan: semua percakapan disimpan otomatis. Gunakan /history,
    /load <n> dan /delete <n> untuk melihat, memuat ulang, atau menghapusnya.
  - Analisis Gambar: lampirkan gambar dengan /image <path>. AI akan
    menganalisis gambar dan mengaitkannya dengan filsafat Stoa.
  - Sistem Cooldown: Anda dapat mengirim prompt setiap 5 detik. Setelah 10
    prompt, akan ada jeda 1 menit.

Tips Berinteraksi:
  - \"Bagaimana cara menerapkan dikotomi kendali dalam pekerjaan?\"
  - \"Jelaskan ajaran Marcus Aurelius tentang kematian.\"
  - \"Apa yang dimaksud dengan kebajikan dalam Stoa?\"

Ingat, StoicAI berfokus pada filsafat Stoa.";

/// Shown while a reply is on its way
pub const PENDING: &str = "StoicAI: ...";

pub const HELP: &str = "\
Commands:
  <text>          send a message
  /new            start a new chat
  /history        list saved chats
  /load <n>       open chat number n
  /delete <n>     delete chat number n
  /image <path>   attach an image to the next message
  /unimage        remove the attached image
  /guide          show the usage guide
  /help           show this help
  /quit           exit";

pub fn message(msg: &Message) -> String {
    let who = match msg.role {
        Role::User => "Anda",
        Role::Model => "StoicAI",
    };

    let mut out = format!("{}:", who);
    if let Some(text) = &msg.text {
        out.push(' ');
        out.push_str(text);
    }
    if msg.image.is_some() {
        out.push_str(" [gambar]");
    }
    out
}

pub fn transcript(messages: &[Message]) -> String {
    messages.iter().map(message).collect::<Vec<_>>().join("\n\n")
}

/// Numbered history listing, `*` marking the active session
pub fn history(history: &ChatHistory, current_id: &str) -> String {
    if history.is_empty() {
        return "Riwayat obrolan kosong.".to_string();
    }

    history
        .iter()
        .enumerate()
        .map(|(i, session)| {
            let marker = if session.id == current_id { '*' } else { ' ' };
            format!("{} {:>2}. {}", marker, i + 1, session.title)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
