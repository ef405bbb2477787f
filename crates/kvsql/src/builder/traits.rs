use crate::error::BuildResult;
use crate::statement::{Statement, StatementKind, log_built, log_rejected};

/// Base trait for statement builders.
pub trait SqlBuilder {
    /// Kind of statement this builder produces.
    fn kind(&self) -> StatementKind;

    /// Render the statement without validating or logging it.
    ///
    /// Only meaningful after `validate` passed.
    fn render(&self) -> Statement;

    /// Validate builder state.
    fn validate(&self) -> BuildResult<()> {
        Ok(())
    }

    /// Validate, then build the statement.
    fn build(&self) -> BuildResult<Statement> {
        if let Err(err) = self.validate() {
            log_rejected(self.kind(), &err);
            return Err(err);
        }
        let stmt = self.render();
        log_built(&stmt);
        Ok(stmt)
    }

    /// Debug helper.
    fn to_sql(&self) -> String {
        self.render().into_parts().0
    }
}
