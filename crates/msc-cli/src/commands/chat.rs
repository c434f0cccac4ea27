use anyhow::Result;
use msc_application::{ChatMessage, ChatSession, Sender};
use std::io::{BufRead, Write};

fn print(message: &ChatMessage) {
    let who = match message.sender {
        Sender::User => "you",
        Sender::Bot => "msc",
    };
    println!("[{}] {}: {}\n", message.timestamp.format("%H:%M"), who, message.text);
}

fn print_help(chat: &ChatSession) {
    println!("Quick replies:");
    for reply in chat.quick_replies() {
        println!("  /{:<8} {}", reply.id, reply.text);
    }
    println!("  /reset    start over\n  /quit     leave\n");
}

/// Reads lines from stdin until `/quit` or end of input.
pub fn run() -> Result<()> {
    let mut chat = ChatSession::new();
    chat.messages().iter().for_each(print);
    print_help(&chat);

    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;
        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;

        match line.trim() {
            "/quit" => break,
            "/help" => print_help(&chat),
            "/reset" => {
                chat.reset();
                chat.messages().iter().for_each(print);
            }
            command if command.starts_with('/') => match chat.choose_quick_reply(&command[1..]) {
                Ok(reply) => print(reply),
                Err(e) => println!("{}\n", e),
            },
            text => {
                if let Some(reply) = chat.send(text) {
                    print(reply);
                }
            }
        }
    }
    Ok(())
}
