use c3_ir::{DocumentId, Position, Symbol};
use c3_syntax::{lex, TokenKind};

use crate::{Resolver, SearchParams, Workspace};

/// The signature of the function being called at the cursor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignatureInfo {
    /// `module::name(type a, type b)`
    pub label: String,
    pub parameters: Vec<String>,
    pub active_parameter: Option<u32>,
}

impl Workspace {
    pub fn resolve_signature_help(
        &self,
        document: &DocumentId,
        position: Position,
    ) -> Option<SignatureInfo> {
        let doc = self.document(document)?;
        let offset = doc.line_index.offset(position)?;
        let (callee_end, argument) = enclosing_call(&doc.text, offset)?;

        let params = SearchParams::from_position(doc, doc.line_index.position(callee_end))?;
        let Symbol::Function(function) = Resolver::new(self).resolve(&params)? else {
            return None;
        };

        // `value.method(a)` passes `self` implicitly.
        let implicit_self = !params.access_path.is_empty()
            && function.type_identifier.is_some()
            && function.parameters.first().is_some_and(|p| p.base.name == "self");
        let parameters = function.parameter_labels();
        let active = argument + usize::from(implicit_self);

        let name = if function.base.module.is_empty() {
            function.full_name()
        } else {
            format!("{}::{}", function.base.module, function.full_name())
        };
        Some(SignatureInfo {
            label: format!("{name}({})", parameters.join(", ")),
            active_parameter: (!parameters.is_empty())
                .then(|| u32::try_from(active.min(parameters.len() - 1)).unwrap_or(u32::MAX)),
            parameters,
        })
    }
}

/// The innermost unclosed `(` before `offset`: the end of the callee
/// name in front of it and the index of the argument being written.
/// Brackets inside strings and comments are not counted.
fn enclosing_call(text: &str, offset: usize) -> Option<(usize, usize)> {
    let lexed = lex(text);
    let before = lexed.tokens.partition_point(|token| token.end <= offset);
    let tokens = &lexed.tokens[..before];

    let mut depth = 0usize;
    let mut argument = 0usize;
    for (i, token) in tokens.iter().enumerate().rev() {
        match token.kind {
            TokenKind::RParen | TokenKind::RBracket => depth += 1,
            TokenKind::LBracket if depth == 0 => return None,
            TokenKind::LParen if depth == 0 => {
                let callee = tokens.get(i.checked_sub(1)?)?;
                return callee.kind.is_identifier().then_some((callee.end, argument));
            }
            TokenKind::LParen | TokenKind::LBracket => depth -= 1,
            TokenKind::Comma if depth == 0 => argument += 1,
            TokenKind::Semi | TokenKind::LBrace | TokenKind::RBrace if depth == 0 => return None,
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::enclosing_call;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_enclosing_call() {
        let text = "foo(a, bar(1, 2), ";
        assert_eq!(enclosing_call(text, text.len()), Some((3, 2)));
        assert_eq!(enclosing_call(text, 12), Some((10, 0)));
        assert_eq!(enclosing_call("x = (a + b", 10), None);
        assert_eq!(enclosing_call("foo(a); bar", 11), None);
        assert_eq!(enclosing_call("list[foo(1", 10), Some((8, 0)));
        assert_eq!(enclosing_call("list[1, ", 8), None);
        assert_eq!(enclosing_call("x = 1 (2, ", 10), None);
    }

    #[test]
    fn test_enclosing_call_skips_strings_and_comments() {
        let cases = [
            "foo(\"a)\", ",
            "foo('(', ",
            "foo(\"(\", ",
            "foo(/* ) */ a, ",
            "foo(a, // )\n",
            "foo(`;)`, ",
        ];
        for text in cases {
            assert_eq!(enclosing_call(text, text.len()), Some((3, 1)), "{text:?}");
        }
    }
}
