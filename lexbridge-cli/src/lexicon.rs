//! Lexeme lookups against a wikibase query service.

use lexbridge_sparql::Binding;
use std::collections::HashSet;

/// Lexical category item for proper nouns.
pub const PROPER_NOUN_CATEGORY: &str = "Q53";

/// Variable holding the lemma in [`proper_noun_query`].
pub const LEMMA_VAR: &str = "lemma";

/// SELECT every lexical entry in `category` with its lemma.
///
/// `ontolex:` and `wikibase:` are predeclared by the wikibase query service;
/// `pr:` and `it:` are bound to the wiki's own namespaces.
pub fn proper_noun_query(wiki_url: &str, category: &str) -> String {
    let wiki_url = wiki_url.trim_end_matches('/');
    format!(
        r#"PREFIX pr: <{wiki_url}/prop/direct/>
PREFIX it: <{wiki_url}/entity/>

SELECT ?lex ?{LEMMA_VAR} WHERE {{
  ?lex a ontolex:LexicalEntry ;
         wikibase:lexicalCategory it:{category} ;
         wikibase:lemma ?{LEMMA_VAR} .
}}
"#
    )
}

/// Collect the lexical values bound to `var`. Rows without it are skipped.
pub fn lemma_set(rows: &[Binding], var: &str) -> HashSet<String> {
    rows.iter()
        .filter_map(|row| row.value(var))
        .map(str::to_string)
        .collect()
}
