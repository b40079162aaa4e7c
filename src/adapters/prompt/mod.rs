pub mod terminal_prompter;
