use nu_ansi_term::Color::{Cyan, Green, Red};

/// Print info on console.
pub fn info(message: &str) {
    println!("{}", Cyan.bold().italic().paint(message));
}

/// Print the outcome of a successful operation on console.
pub fn success(message: &str) {
    println!("{}", Green.bold().paint(message));
}

/// Print warning on console.
pub fn warn(message: &str, data: &str) {
    println!(
        "{} \n {} ",
        Cyan.bold().italic().paint(message),
        Red.bold().italic().paint(data)
    );
}

/// Print a heading followed by one indented line per item. Nothing is printed for an empty
/// list.
pub fn list(heading: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    info(heading);
    println!("{}", indented(items));
}

fn indented(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("  {item}"))
        .collect::<Vec<_>>()
        .join("\n")
}
