use engine::{calculate_idf, preprocess, search, CorpusItem, DocumentDescriptor, Language, SearchIndex};

const EPS: f64 = 1e-9;

fn items_for(descriptors: &[(&DocumentDescriptor, &str, &str)]) -> Vec<CorpusItem> {
    descriptors
        .iter()
        .flat_map(|(d, en, gr)| {
            [
                preprocess(d.title(Language::En), en, &d.download_url, Language::En),
                preprocess(d.title(Language::Gr), gr, &d.download_url, Language::Gr),
            ]
        })
        .collect()
}

#[test]
fn idf_matches_closed_forms() {
    let corpus: Vec<CorpusItem> = (0..5)
        .map(|i| {
            let text = if i == 0 { "shared unique" } else { "shared" };
            preprocess("doc", text, &format!("https://x/{i}.html"), Language::En)
        })
        .collect();
    let idf = calculate_idf(&corpus);
    let n = corpus.len() as f64;
    assert!((idf.weight("shared") - (n / (n + 1.0)).ln()).abs() < EPS);
    assert!(idf.weight("shared") <= 0.0);
    assert!((idf.weight("unique") - (n / 2.0).ln()).abs() < EPS);
}

#[test]
fn single_item_scores() {
    let title_only = vec![preprocess("tor", "", "u", Language::En)];
    let idf = calculate_idf(&title_only);
    let r = search("tor", &title_only, &idf);
    assert_eq!(r.len(), 1);
    assert!((r[0].score - 10.0 * idf.weight("tor")).abs() < EPS);

    let both = vec![preprocess("tor", "about tor", "u", Language::En)];
    let idf = calculate_idf(&both);
    let r = search("tor", &both, &idf);
    assert!((r[0].score - 11.0 * idf.weight("tor")).abs() < EPS);
}

#[test]
fn unseen_tokens_still_score_with_default_weight() {
    let items = vec![preprocess("tor", "tor", "u", Language::En)];
    // The IDF table is computed over a different corpus, so "tor" is unknown to it.
    let idf = calculate_idf(&[preprocess("vpn", "", "v", Language::En)]);
    assert_eq!(idf.get("tor"), None);
    let r = search("tor", &items, &idf);
    assert_eq!(r.len(), 1);
    assert!((r[0].score - 11.0 * 0.5).abs() < EPS);
}

#[test]
fn results_are_ranked_and_zero_scores_dropped() {
    let items = vec![
        preprocess("vpn", "", "u1", Language::En),
        preprocess("other", "vpn setup", "u2", Language::En),
        preprocess("vpn guide", "vpn", "u3", Language::En),
        preprocess("unrelated", "nothing here", "u4", Language::En),
        preprocess("more", "filler", "u5", Language::En),
    ];
    let idf = calculate_idf(&items);
    let r = search("vpn setup", &items, &idf);
    assert!(r.iter().all(|s| s.score != 0.0));
    assert!(r.windows(2).all(|w| w[0].score >= w[1].score));
    let urls: Vec<&str> = r.iter().map(|s| s.item.url()).collect();
    assert!(!urls.contains(&"u4"));
    assert!(!urls.contains(&"u5"));
    assert_eq!(urls[0], "u3");
}

#[test]
fn firewall_end_to_end() {
    let fw = DocumentDescriptor::new("1_Firewall_Setup.html", "https://x/1_Firewall_Setup.html", ".html");
    let pw = DocumentDescriptor::new("2_Passwords_(Κωδικοί).html", "https://x/2.html", ".html");
    let tor = DocumentDescriptor::new("3_Tor.html", "https://x/3.html", ".html");
    let index = SearchIndex::new(items_for(&[
        (&fw, "Configure rules.", "Ρυθμίστε κανόνες."),
        (&pw, "Use long passwords.", "Μακριοί κωδικοί."),
        (&tor, "Onion routing.", "Δρομολόγηση."),
    ]));

    let r = index.search("firewall", Language::En);
    assert_eq!(r.len(), 1);
    assert_eq!(r[0].item.url(), fw.download_url);
    assert!(r[0].score > 0.0);
}
