use std::{path::PathBuf, time::Duration};

pub(crate) const HELP: &str = "\
Commands:
  Enter           - run one step
  s NUM           - run NUM steps
  g NUM           - run NUM generations
  f NUM           - run until a network's fitness is above NUM
  t NUM           - run for NUM seconds
  ng              - run until the next generation
  drawing on|off  - draw the boards after every step
  save FILE       - save the top performing network to FILE
  load FILE       - load a network from FILE into the last place
  help            - show this help
  e, exit         - stop training";

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Command {
    Steps(usize),
    Generations(usize),
    NextGeneration,
    UntilFitness(f32),
    RunFor(Duration),
    Drawing(bool),
    Save(PathBuf),
    Load(PathBuf),
    Help,
    Exit,
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub(crate) enum CommandError {
    #[display("`{command}` needs an argument, e.g. `{example}`")]
    MissingArgument {
        command: &'static str,
        example: &'static str,
    },
    #[display("`{_0}` is not a valid number")]
    InvalidNumber(#[error(not(source))] String),
    #[display("`{_0}` is not `on` or `off`")]
    InvalidSwitch(#[error(not(source))] String),
    #[display("unknown command `{_0}`, type `help` for the list of commands")]
    Unknown(#[error(not(source))] String),
}

impl Command {
    pub(crate) fn parse(line: &str) -> Result<Self, CommandError> {
        let mut parts = line.split_whitespace();
        let Some(name) = parts.next() else {
            return Ok(Command::Steps(1));
        };
        let mut argument = |command, example| {
            parts
                .next()
                .ok_or(CommandError::MissingArgument { command, example })
        };

        let command = match name {
            "e" | "exit" => Command::Exit,
            "help" => Command::Help,
            "ng" => Command::NextGeneration,
            "s" => Command::Steps(number(argument("s", "s 10")?)?),
            "g" => Command::Generations(number(argument("g", "g 3")?)?),
            "f" => Command::UntilFitness(number(argument("f", "f 20")?)?),
            "t" => Command::RunFor(Duration::from_secs(number(argument("t", "t 60")?)?)),
            "drawing" => Command::Drawing(switch(argument("drawing", "drawing off")?)?),
            "save" => Command::Save(argument("save", "save network.neural")?.into()),
            "load" => Command::Load(argument("load", "load network.neural")?.into()),
            _ => return Err(CommandError::Unknown(name.to_owned())),
        };
        Ok(command)
    }
}

fn number<T>(s: &str) -> Result<T, CommandError>
where
    T: std::str::FromStr,
{
    s.parse()
        .map_err(|_| CommandError::InvalidNumber(s.to_owned()))
}

fn switch(s: &str) -> Result<bool, CommandError> {
    match s {
        "on" | "enable" | "e" | "1" => Ok(true),
        "off" | "disable" | "d" | "0" => Ok(false),
        _ => Err(CommandError::InvalidSwitch(s.to_owned())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        let parse = |s| Command::parse(s).unwrap();
        assert_eq!(parse(""), Command::Steps(1));
        assert_eq!(parse("  \n"), Command::Steps(1));
        assert_eq!(parse("s 10"), Command::Steps(10));
        assert_eq!(parse("g 3\n"), Command::Generations(3));
        assert_eq!(parse("f 20.5"), Command::UntilFitness(20.5));
        assert_eq!(parse("t 60"), Command::RunFor(Duration::from_secs(60)));
        assert_eq!(parse("ng"), Command::NextGeneration);
        assert_eq!(parse("drawing enable"), Command::Drawing(true));
        assert_eq!(parse("drawing off"), Command::Drawing(false));
        assert_eq!(parse("save best.neural"), Command::Save("best.neural".into()));
        assert_eq!(parse("load best.neural"), Command::Load("best.neural".into()));
        assert_eq!(parse("help"), Command::Help);
        assert_eq!(parse("e"), Command::Exit);
        assert_eq!(parse("exit"), Command::Exit);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            Command::parse("s"),
            Err(CommandError::MissingArgument {
                command: "s",
                example: "s 10"
            })
        );
        assert_eq!(
            Command::parse("g many"),
            Err(CommandError::InvalidNumber("many".to_owned()))
        );
        assert_eq!(
            Command::parse("t -5"),
            Err(CommandError::InvalidNumber("-5".to_owned()))
        );
        assert_eq!(
            Command::parse("drawing maybe"),
            Err(CommandError::InvalidSwitch("maybe".to_owned()))
        );
        assert_eq!(
            Command::parse("jump 3"),
            Err(CommandError::Unknown("jump".to_owned()))
        );
        assert_eq!(
            Command::parse("save").unwrap_err().to_string(),
            "`save` needs an argument, e.g. `save network.neural`"
        );
    }
}
