pub use self::statement_form::StatementForm;

mod statement_form;
