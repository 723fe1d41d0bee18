//! ## Printing Module
//!
//! This module is only here to make logging in the terminal easier to read.
//! It prints messages in colours depending on the situation, and provides a
//! table format for the state of the elevator bank.
//!
//! Every function checks its flag in [crate::config] first, so output can be
//! switched off per category from the command line.
use ansi_term::Colour::{self, Cyan, Green, Purple, Red, Yellow};
use prettytable::{format, Cell, Row, Table};
use unicode_width::UnicodeWidthStr;

use crate::bank_view::BankView;
use crate::config;
use crate::elevator_logic::request::Heading;

/// Prints an error message in red to the terminal.
///
/// If `PRINT_ERR_ON` is `false`, the message will not be printed.
///
/// ## Terminal output
/// - "\[ERROR\]:   {}", msg
///
/// ## Example
/// ```
/// use elevatorbank::print;
///
/// print::err("Something went wrong!".to_string());
/// ```
pub fn err(msg: String) {
    if config::is_on(&config::PRINT_ERR_ON) {
        println!("{}{}\n", Red.paint("[ERROR]:   "), Red.paint(msg));
    }
}

/// Prints a warning message in yellow to the terminal.
///
/// If `PRINT_WARN_ON` is `false`, the message will not be printed.
///
/// ## Terminal output
/// - "\[WARNING\]: {}", msg
pub fn warn(msg: String) {
    if config::is_on(&config::PRINT_WARN_ON) {
        println!("{}{}\n", Yellow.paint("[WARNING]: "), Yellow.paint(msg));
    }
}

/// Prints a success message in green to the terminal.
///
/// If `PRINT_OK_ON` is `false`, the message will not be printed.
///
/// ## Terminal output
/// - "\[OK\]:      {}", msg
pub fn ok(msg: String) {
    if config::is_on(&config::PRINT_OK_ON) {
        println!("{}{}\n", Green.paint("[OK]:      "), Green.paint(msg));
    }
}

/// Prints an informational message in light blue to the terminal.
///
/// If `PRINT_INFO_ON` is `false`, the message will not be printed.
///
/// ## Terminal output
/// - "\[INFO\]:    {}", msg
pub fn info(msg: String) {
    let light_blue = Colour::RGB(102, 178, 255);
    if config::is_on(&config::PRINT_INFO_ON) {
        println!("{}{}\n", light_blue.paint("[INFO]:    "), light_blue.paint(msg));
    }
}

/// Pads the input text to a fixed display width using spaces.
///
/// Accounts for characters that take more than one column (e.g. arrows),
/// so boxes drawn around the text stay aligned.
fn pad_text(text: &str, width: usize) -> String {
    let visible_width = UnicodeWidthStr::width(text);
    let padding = width.saturating_sub(visible_width);
    format!("{}{}", text, " ".repeat(padding))
}

/// Arrow for a heading, `■` for an idle car.
fn heading_symbol(heading: Option<Heading>) -> &'static str {
    match heading {
        Some(Heading::Up) => "▲",
        Some(Heading::Down) => "▼",
        None => "■",
    }
}

/// The shaft cell for one car on one floor. Empty if the car is elsewhere.
fn car_cell(view: &BankView, car: usize, floor: u8) -> Cell {
    let Some(c) = view.cars.get(car).filter(|c| c.floor == floor) else {
        return Cell::new("");
    };
    match c.target {
        Some(target) => Cell::new(&format!("{} {}", heading_symbol(c.heading), target)).style_spec("Fy"),
        None => Cell::new(heading_symbol(None)).style_spec("Fg"),
    }
}

/// The call cell for one floor: pending up/down calls, red while unclaimed.
fn calls_cell(view: &BankView, floor: u8) -> Cell {
    let mut text = String::new();
    let mut any_unclaimed = false;
    for heading in Heading::ALL {
        match view.pending_at(floor, heading) {
            Some(entry) => {
                text.push_str(heading_symbol(Some(heading)));
                any_unclaimed |= !entry.claimed;
            }
            None => text.push(' '),
        }
    }
    let cell = Cell::new(&text);
    if any_unclaimed {
        cell.style_spec("Fr")
    } else {
        cell.style_spec("Fg")
    }
}

/// Prints the state of the bank as a shaft table, top floor first.
///
/// One column per car showing where it is (`▲ 7` = moving up towards 7,
/// `■` = idle), and a column with the calls waiting on each floor
/// (red while no car has claimed them).
///
/// # Behavior
/// - If `config::PRINT_VIEW_ON` is false, the function exits early.
pub fn bank_view(view: &BankView) {
    if !config::is_on(&config::PRINT_VIEW_ON) {
        return;
    }

    println!("{}", Purple.bold().paint("┌────────────────────────────────┐"));
    println!("{}", Purple.bold().paint(format!("│ {} │", pad_text(&format!("ELEVATOR BANK – ROUND {}", view.round), 30))));
    println!("{}", Purple.bold().paint("└────────────────────────────────┘"));

    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BOX_CHARS);

    let mut titles = vec![Cell::new("Floor").style_spec("b")];
    titles.extend(view.cars.iter().map(|c| Cell::new(&format!("Car {}", c.id)).style_spec("b")));
    titles.push(Cell::new("Calls ▲▼").style_spec("b"));
    table.set_titles(Row::new(titles));

    for floor in (1..=view.max_floor).rev() {
        let mut cells = vec![Cell::new(&floor.to_string())];
        cells.extend((0..view.cars.len()).map(|car| car_cell(view, car, floor)));
        cells.push(calls_cell(view, floor));
        table.add_row(Row::new(cells));
    }
    table.printstd();

    println!("{}", Cyan.paint("┌────────────────────────────────┐"));
    println!("{}", Cyan.paint(format!("│ {} │", pad_text(&format!("Requests served:  {}", view.served), 30))));
    println!(
        "{}",
        Cyan.paint(format!("│ {} │", pad_text(&format!("Average wait:     {:.2} rounds", view.average_wait), 30)))
    );
    println!("{}", Cyan.paint("└────────────────────────────────┘"));
}

/// Prints the bank as one line of JSON.
///
/// If `config::PRINT_JSON_ON` is false, the function exits early.
pub fn bank_view_json(view: &BankView) {
    if !config::is_on(&config::PRINT_JSON_ON) {
        return;
    }
    match serde_json::to_string(view) {
        Ok(json) => println!("{}", json),
        Err(e) => err(format!("Failed to serialize bank view: {}", e)),
    }
}
