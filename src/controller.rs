use std::io::{self, BufRead, BufReader, Stdin};

use tracing::trace;

use crate::domain::{MENU_TEXT, Message, PTVConfig, PTVError};
use crate::inputter::Inputter;
use crate::model::Model;

pub struct Controller<R> {
    input: Inputter<R>,
}

impl Controller<BufReader<Stdin>> {
    pub fn new(cfg: &PTVConfig) -> Self {
        Self::with_reader(cfg, BufReader::new(io::stdin()))
    }
}

impl<R: BufRead> Controller<R> {
    pub fn with_reader(_cfg: &PTVConfig, reader: R) -> Self {
        Self {
            input: Inputter::new(reader),
        }
    }

    // Present the menu once and map the answer to a Message. None means
    // the choice was invalid and the menu is shown again. A closed input
    // stream maps to Quit so piped sessions terminate cleanly.
    pub fn handle_input(&mut self, _model: &Model) -> Result<Option<Message>, PTVError> {
        println!("{MENU_TEXT}");
        let Some(choice) = self.input.read_number("Your choice: ")? else {
            return Ok(Some(Message::Quit));
        };

        let message = match choice {
            1 => self.display_message()?,
            2 => self.search_message()?,
            3 => self.sort_message()?,
            4 => self.export_message()?,
            5 => {
                println!("Exiting program...");
                Some(Message::Quit)
            }
            _ => {
                println!("Invalid choice!");
                None
            }
        };
        trace!("Mapped choice {choice} => {message:?}");
        Ok(message)
    }

    fn display_message(&mut self) -> Result<Option<Message>, PTVError> {
        let Some(nrows) = self.input.read_number("How many rows to display? ")? else {
            return Ok(Some(Message::Quit));
        };
        Ok(Some(Message::Display(nrows)))
    }

    fn search_message(&mut self) -> Result<Option<Message>, PTVError> {
        let Some(column) = self.input.read_line("Select column: ")? else {
            return Ok(Some(Message::Quit));
        };
        let Some(query) = self.input.read_line("Data to search: ")? else {
            return Ok(Some(Message::Quit));
        };
        Ok(Some(Message::Search { column, query }))
    }

    fn sort_message(&mut self) -> Result<Option<Message>, PTVError> {
        let Some(column) = self.input.read_line("Select column to sort: ")? else {
            return Ok(Some(Message::Quit));
        };
        let Some(order) = self
            .input
            .read_line("Sort ascending (asc) or descending (desc)? ")?
        else {
            return Ok(Some(Message::Quit));
        };
        Ok(Some(Message::Sort { column, order }))
    }

    fn export_message(&mut self) -> Result<Option<Message>, PTVError> {
        let Some(base) = self.input.read_line("Export filename: ")? else {
            return Ok(Some(Message::Quit));
        };
        Ok(Some(Message::Export(base)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn model() -> Model {
        Model::from_text("Name,Price\nAlice,1\n", &PTVConfig::default())
    }

    fn controller(script: &str) -> Controller<Cursor<Vec<u8>>> {
        Controller::with_reader(
            &PTVConfig::default(),
            Cursor::new(script.as_bytes().to_vec()),
        )
    }

    #[test]
    fn maps_display_choice_with_row_count() {
        let mut c = controller("1\n7\n");
        let message = c.handle_input(&model()).unwrap();
        assert!(matches!(message, Some(Message::Display(7))));
    }

    #[test]
    fn maps_search_choice_with_prompts() {
        let mut c = controller("2\nName\nAlice\n");
        match c.handle_input(&model()).unwrap() {
            Some(Message::Search { column, query }) => {
                assert_eq!(column, "Name");
                assert_eq!(query, "Alice");
            }
            other => panic!("unexpected message {other:?}"),
        }
    }

    #[test]
    fn maps_sort_choice_with_prompts() {
        let mut c = controller("3\nPrice\ndesc\n");
        match c.handle_input(&model()).unwrap() {
            Some(Message::Sort { column, order }) => {
                assert_eq!(column, "Price");
                assert_eq!(order, "desc");
            }
            other => panic!("unexpected message {other:?}"),
        }
    }

    #[test]
    fn invalid_choice_maps_to_nothing() {
        let mut c = controller("9\n");
        assert!(c.handle_input(&model()).unwrap().is_none());
    }

    #[test]
    fn non_numeric_choice_is_reprompted() {
        let mut c = controller("quit\n5\n");
        let message = c.handle_input(&model()).unwrap();
        assert!(matches!(message, Some(Message::Quit)));
    }

    #[test]
    fn closed_input_quits() {
        let mut c = controller("");
        assert!(matches!(
            c.handle_input(&model()).unwrap(),
            Some(Message::Quit)
        ));
    }

    #[test]
    fn closed_input_mid_prompt_quits() {
        let mut c = controller("2\nName\n");
        assert!(matches!(
            c.handle_input(&model()).unwrap(),
            Some(Message::Quit)
        ));
    }
}
