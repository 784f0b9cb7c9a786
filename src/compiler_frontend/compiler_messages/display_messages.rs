use crate::compiler_frontend::compiler_errors::{CompilerError, ErrorType, error_type_to_str};
use saying::say;

pub fn print_errors(errors: &[CompilerError]) {
    for err in errors {
        print_formatted_error(err);
    }
}

pub fn print_formatted_error(e: &CompilerError) {
    let error_kind = error_type_to_str(&e.error_type);

    match e.error_type {
        ErrorType::UndefinedVariable | ErrorType::DivisionByZero => {
            say!(Red error_kind, Red ": ", e.msg.to_owned());
        }
        ErrorType::Config | ErrorType::File => {
            say!(Yellow error_kind, Yellow ": ", e.msg.to_owned());
        }
    }

    // Sorted so the output is stable between runs
    let mut details: Vec<_> = e.metadata.iter().collect();
    details.sort_by_key(|(key, _)| **key);

    for (key, value) in details {
        say!(Bright Black "    ", Bright Black key.to_str(), Bright Black ": ", value.to_owned());
    }
}
