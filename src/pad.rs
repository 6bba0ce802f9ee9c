//! Interactive console pad.
//!
//! Line-oriented front end for the keypad machine: each character of an input
//! line is mapped to a key, the line is fed through [`Keypad::press`], and the
//! display plus history trace are printed afterwards. Commands emitted by the
//! machine are dispatched on a spawned task, so input handling never waits on
//! the log service.

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::calc::{Command, Key, Keypad, Operator};
use crate::client::LogClient;

pub async fn run(client: LogClient) -> Result<()> {
    println!("tallypad: 0-9 . + - * / | 'p' percent-of | '%' percent | 's' sign | '<' backspace | '=' eval | 'c' clear | 'q' quit");
    show_recent(&client).await;

    let mut pad = Keypad::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    render(&pad);
    while let Some(line) = lines.next_line().await? {
        if line.trim() == "q" {
            break;
        }
        for ch in line.chars() {
            let Some(key) = key_for(ch) else { continue };
            if let Some(command) = pad.press(key) {
                dispatch(&client, command);
            }
        }
        render(&pad);
    }

    Ok(())
}

fn render(pad: &Keypad) {
    if pad.history.is_empty() {
        println!("  {}", pad.display);
    } else {
        println!("  {}   [{}]", pad.display, pad.history);
    }
}

/// Keyboard map for the pad. Digits and operator characters mean themselves;
/// 'p' selects the binary percent operator, 's' toggles the sign and '<' is
/// backspace. Anything else is ignored.
fn key_for(ch: char) -> Option<Key> {
    match ch {
        '0'..='9' => Some(Key::Digit(ch as u8 - b'0')),
        '+' => Some(Key::Operator(Operator::Add)),
        '-' => Some(Key::Operator(Operator::Subtract)),
        '*' | 'x' => Some(Key::Operator(Operator::Multiply)),
        '/' => Some(Key::Operator(Operator::Divide)),
        'p' => Some(Key::Operator(Operator::Percent)),
        '%' => Some(Key::Percent),
        '.' | ',' => Some(Key::Decimal),
        '=' => Some(Key::Equals),
        'c' | 'C' => Some(Key::Clear),
        's' | 'S' => Some(Key::ToggleSign),
        '<' => Some(Key::Backspace),
        _ => None,
    }
}

/// Deliver a command in the background: persist first, then repaint the
/// recent list. Failures are logged and dropped, never surfaced to the
/// arithmetic flow.
fn dispatch(client: &LogClient, command: Command) {
    let Command::Persist { expression, result } = command;
    let client = client.clone();
    tokio::spawn(async move {
        if let Err(e) = client.save_calculation(&expression, &result).await {
            tracing::warn!("Failed to save calculation: {}", e);
            return;
        }
        show_recent(&client).await;
    });
}

async fn show_recent(client: &LogClient) {
    match client.recent_calculations(None).await {
        Ok(calculations) if calculations.is_empty() => println!("  (no calculations yet)"),
        Ok(calculations) => {
            println!("  recent:");
            for calc in calculations {
                println!("    {} = {}", calc.expression, calc.result);
            }
        }
        Err(e) => tracing::warn!("Failed to fetch recent calculations: {}", e),
    }
}
