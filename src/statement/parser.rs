use chumsky::Parser;

use super::lexer::{Token, lexer};
use super::{Input, MetaCommand, PrepareError, PrepareResult, Statement};
use crate::record::{RecordError, Row};

/// Classify a line as a meta command or a statement and validate it
pub fn prepare_input(line: &str) -> PrepareResult<Input> {
    if line.starts_with('.') {
        prepare_meta_command(line).map(Input::Meta)
    } else {
        prepare_statement(line).map(Input::Statement)
    }
}

pub fn prepare_meta_command(line: &str) -> PrepareResult<MetaCommand> {
    match line {
        ".exit" => Ok(MetaCommand::Exit),
        ".constants" => Ok(MetaCommand::Constants),
        _ => Err(PrepareError::UnrecognizedCommand(line.to_string())),
    }
}

pub fn prepare_statement(line: &str) -> PrepareResult<Statement> {
    let tokens = lexer()
        .parse(line)
        .into_result()
        .map_err(|_| PrepareError::SyntaxError)?;

    match tokens.split_first() {
        Some((Token::Keyword("insert"), args)) => prepare_insert(args),
        Some((Token::Keyword("select"), [])) => Ok(Statement::Select),
        Some((Token::Keyword("select"), _)) => Err(PrepareError::SyntaxError),
        _ => Err(PrepareError::UnrecognizedStatement(line.to_string())),
    }
}

// insert <id> <username> <email>
fn prepare_insert(args: &[Token<'_>]) -> PrepareResult<Statement> {
    let [id, username, email] = args else {
        return Err(PrepareError::SyntaxError);
    };

    let id = match id {
        Token::Integer(text) => text
            .parse::<i64>()
            .map_err(|_| PrepareError::SyntaxError)?,
        _ => return Err(PrepareError::SyntaxError),
    };
    if id < 0 {
        return Err(PrepareError::NegativeId);
    }
    let id = u32::try_from(id).map_err(|_| PrepareError::SyntaxError)?;

    let row = Row::new(id, username.text(), email.text()).map_err(|e| match e {
        RecordError::FieldTooLong { .. } => PrepareError::StringTooLong,
        _ => PrepareError::SyntaxError,
    })?;

    Ok(Statement::Insert(row))
}
