use tfindex_core::tokenizer::{tokenize, StopWords};

#[test]
fn it_lowercases_and_keeps_c_words() {
    let words = tokenize("Cobol, C++ and COFFEE! Dogs can't code.", &StopWords::new());
    assert_eq!(words, vec!["cobol", "c", "coffee", "can", "code"]);
}

#[test]
fn it_filters_stopwords() {
    let stop = StopWords::from_text("can\ncould\n");
    let words = tokenize("Could the cat CAN-can? Cats could.", &stop);
    assert!(!words.contains(&"can".to_string()));
    assert!(!words.contains(&"could".to_string()));
    assert_eq!(words, vec!["cat", "cats"]);
}

#[test]
fn it_treats_digits_and_underscores_as_word_chars() {
    let words = tokenize("c3po c_major 42c", &StopWords::new());
    assert_eq!(words, vec!["c3po", "c_major"]);
}

#[test]
fn missing_stop_list_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let stop = StopWords::load(dir.path().join("absent.txt")).unwrap();
    assert!(stop.is_empty());
}
