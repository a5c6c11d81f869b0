// ABOUTME: REPL helper providing tab completion from the environment's
// symbol table

use crate::env::Environment;
use rustyline::completion::{Completer, Pair};
use rustyline::Context;
use rustyline_derive::{Helper, Highlighter, Hinter, Validator};
use std::rc::Rc;

#[derive(Helper, Highlighter, Hinter, Validator)]
pub struct LispyHelper {
    env: Rc<Environment>,
}

impl LispyHelper {
    pub fn new(env: Rc<Environment>) -> Self {
        LispyHelper { env }
    }
}

impl Completer for LispyHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let start = line[..pos]
            .rfind(|c: char| c.is_whitespace() || matches!(c, '(' | ')' | '{' | '}' | '"'))
            .map_or(0, |i| i + 1);
        let prefix = &line[start..pos];

        let mut candidates: Vec<Pair> = self
            .env
            .keys_with_prefix(prefix)
            .into_iter()
            .map(|name| Pair {
                display: name.clone(),
                replacement: name,
            })
            .collect();
        candidates.sort_by(|a, b| a.display.cmp(&b.display));

        Ok((start, candidates))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtins::register_builtins;
    use rustyline::history::DefaultHistory;

    fn complete(line: &str) -> (usize, Vec<String>) {
        let env = Environment::new();
        register_builtins(&env);
        let helper = LispyHelper::new(env);

        let history = DefaultHistory::new();
        let ctx = Context::new(&history);
        let (start, pairs) = helper
            .complete(line, line.len(), &ctx)
            .expect("completion should succeed");
        (start, pairs.into_iter().map(|p| p.replacement).collect())
    }

    #[test]
    fn test_completion_matches_prefix() {
        let (start, names) = complete("(jo");
        assert_eq!(start, 1);
        assert_eq!(names, vec!["join".to_string()]);
    }

    #[test]
    fn test_completion_uses_the_last_word() {
        let (start, names) = complete("(head {1}) ta");
        assert_eq!(start, 11);
        assert!(names.contains(&"tail".to_string()));
    }
}
