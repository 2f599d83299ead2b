//! Context builder. Renders matched terms as a short bullet list used to
//! prime the model.

use super::store::GlossaryStore;

const BULLET: &str = "•";
const SAFETY_PREFIX: &str = "  Siguria: ";

/// One bullet line per known slug, plus an indented safety line when the
/// entry has one. Unknown slugs are skipped. Empty input gives `""`.
pub fn build_context(store: &GlossaryStore, slugs: &[String]) -> String {
    let mut lines = Vec::with_capacity(slugs.len() * 2);
    for slug in slugs {
        let Some(entry) = store.get(slug) else {
            continue;
        };
        let name = match &entry.english_label {
            Some(en) => format!("{} ({en})", entry.display_name),
            None => entry.display_name.clone(),
        };
        lines.push(format!("{BULLET} {name}: {}", entry.short_definition));
        if let Some(safety) = &entry.safety_note {
            lines.push(format!("{SAFETY_PREFIX}{safety}"));
        }
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slugs(s: &[&str]) -> Vec<String> {
        s.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn empty_slugs_give_empty_string() {
        let store = GlossaryStore::builtin().unwrap();
        assert_eq!(build_context(&store, &[]), "");
    }

    #[test]
    fn entry_with_safety_note_gets_two_lines() {
        let store = GlossaryStore::builtin().unwrap();
        let ctx = build_context(&store, &slugs(&["llak"]));
        assert_eq!(
            ctx,
            "• llak (lacquer / clear protective finish): Shtresë mbrojtëse e hollë që aplikohet \
             mbi dru (ose sipërfaqe të tjera) për shkëlqim dhe mbrojtje nga lagështia / gërvishtjet.\n  \
             Siguria: Puno në vend të ajrosur mirë; avujt mund të jenë toksikë."
        );
    }

    #[test]
    fn entry_without_safety_note_gets_one_line() {
        let store = GlossaryStore::builtin().unwrap();
        let ctx = build_context(&store, &slugs(&["beton"]));
        assert_eq!(ctx.lines().count(), 1);
        assert!(ctx.starts_with("• beton (concrete): Përzierje"));
        assert!(!ctx.ends_with('\n'));
    }

    #[test]
    fn order_follows_input() {
        let store = GlossaryStore::builtin().unwrap();
        let ctx = build_context(&store, &slugs(&["suva", "beton"]));
        let lines: Vec<&str> = ctx.lines().collect();
        assert!(lines[0].starts_with("• suva / suvatim"));
        assert!(lines[1].starts_with("• beton"));
    }

    #[test]
    fn unknown_slug_skipped() {
        let store = GlossaryStore::builtin().unwrap();
        assert_eq!(build_context(&store, &slugs(&["nope"])), "");
        let ctx = build_context(&store, &slugs(&["nope", "beton"]));
        assert!(ctx.starts_with("• beton"));
    }

    #[test]
    fn missing_english_label_omits_parentheses() {
        let store = GlossaryStore::from_toml_str(
            "[[terms]]\nslug = \"tulla\"\nterm = \"tullë\"\nshort = \"Bllok balte.\"\n",
        )
        .unwrap();
        assert_eq!(build_context(&store, &slugs(&["tulla"])), "• tullë: Bllok balte.");
    }
}
