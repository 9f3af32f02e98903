use crate::expr::Expr;

/// Returns a string representation of the expression in parentheses.
macro_rules! parenthesize {
    ( $self:ident, $name:expr, $( $x:expr ),+ ) => {
        {
            let mut string = String::new();
            string += "(";
            string += $name;
            $(
                string += " ";
                string += &$self.print($x);
            )*
            string += ")";

            string
        }
    };
}

/// Renders expressions in a fully parenthesized prefix form, which makes
/// precedence visible at a glance: `1 + 2 * 3` prints as `(+ 1 (* 2 3))`.
/// A debugging aid, mainly exercised by the parser's tests.
pub struct ASTPrinter;

impl ASTPrinter {
    pub fn print(&self, expr: &Expr) -> String {
        match expr {
            Expr::Assign(data) => {
                parenthesize!(self, &format!("= {}", data.name.lexeme), &data.value)
            },
            Expr::Binary(data) => {
                parenthesize!(self, &data.operator.lexeme, &data.left, &data.right)
            },
            Expr::Call(data) => {
                let mut string = self.print(&data.callee);
                string += "(";
                string += &data.arguments.iter()
                    .map(|argument| self.print(argument))
                    .collect::<Vec<String>>()
                    .join(" ");
                string += ")";
                string
            },
            Expr::Get(data) => {
                parenthesize!(self, &format!(". {}", data.name.lexeme), &data.object)
            },
            Expr::Grouping(data) => parenthesize!(self, "group", &data.expr),
            Expr::Literal(literal) => literal.to_string(),
            Expr::Logical(data) => {
                parenthesize!(self, &data.operator.lexeme, &data.left, &data.right)
            },
            Expr::Set(data) => {
                parenthesize!(self, &format!("= . {}", data.name.lexeme), &data.object, &data.value)
            },
            Expr::Super(data) => format!("(super {})", data.method.lexeme),
            Expr::This(_) => String::from("this"),
            Expr::Unary(data) => parenthesize!(self, &data.operator.lexeme, &data.expr),
            Expr::Variable(data) => data.name.lexeme.clone(),
        }
    }
}
