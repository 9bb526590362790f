/// One line of interactive input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Empty,
    Exit,
    List,
    Clear,
    Remove(usize),
    Invalid(&'static str),
    Lookup(String),
}

pub const REMOVE_NOT_INT: &str = "Error: .remove only accepts type int";
pub const REMOVE_ARITY: &str = "Error: .remove requires 1 number as input";

impl Command {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();

        match line {
            "" => Command::Empty,
            ".exit" => Command::Exit,
            ".list" => Command::List,
            ".clear" => Command::Clear,
            _ if line.starts_with(".remove") => Self::parse_remove(line),
            _ => Command::Lookup(line.to_string()),
        }
    }

    fn parse_remove(line: &str) -> Self {
        let parts: Vec<&str> = line.split_whitespace().collect();
        match parts.as_slice() {
            [_, index] if index.bytes().all(|b| b.is_ascii_digit()) => index
                .parse()
                .map(Command::Remove)
                .unwrap_or(Command::Invalid(REMOVE_NOT_INT)),
            [_, _] => Command::Invalid(REMOVE_NOT_INT),
            _ => Command::Invalid(REMOVE_ARITY),
        }
    }
}
