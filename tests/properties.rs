use proptest::prelude::*;

use suctxt::{Serializable, SuccinctText};

fn naive_count(text: &[u8], pat: &[u8]) -> usize {
    naive_search(text, pat).len()
}

fn naive_search(text: &[u8], pat: &[u8]) -> Vec<usize> {
    if pat.is_empty() {
        return (0..text.len()).collect();
    }
    if text.len() < pat.len() {
        return vec![];
    }
    (0..=text.len() - pat.len())
        .filter(|&i| &text[i..i + pat.len()] == pat)
        .collect()
}

fn small_alphabet_text(max_len: usize) -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(prop::sample::select(vec![b'a', b'b', b'c']), 0..max_len)
}

proptest! {
    #[test]
    fn test_count_and_search_match_naive_scan(
        text in small_alphabet_text(80),
        pat in prop::collection::vec(prop::sample::select(vec![b'a', b'b', b'c']), 0..6),
        rate_pow in 0usize..5,
    ) {
        let st = SuccinctText::with_sample_rate(&text, 1 << rate_pow).unwrap();
        prop_assert_eq!(st.count(&pat), naive_count(&text, &pat));
        let mut offsets = st.search(&pat);
        offsets.sort_unstable();
        prop_assert_eq!(offsets, naive_search(&text, &pat));
    }

    #[test]
    fn test_extract_matches_slices(
        text in small_alphabet_text(80),
        offset in 0usize..100,
        len in 0usize..100,
    ) {
        let st = SuccinctText::with_sample_rate(&text, 8).unwrap();
        let offset = offset % (text.len() + 1);
        let end = (offset + len).min(text.len());
        prop_assert_eq!(st.extract(offset, len).unwrap(), &text[offset..end]);
    }

    #[test]
    fn test_sa_isa_roundtrip(text in small_alphabet_text(80), rate_pow in 0usize..5) {
        let st = SuccinctText::with_sample_rate(&text, 1 << rate_pow).unwrap();
        for i in 0..=text.len() {
            prop_assert_eq!(st.lookup_isa(st.lookup_sa(i).unwrap()), Some(i));
            prop_assert_eq!(st.lookup_sa(st.lookup_isa(i).unwrap()), Some(i));
        }
    }

    #[test]
    fn test_fwd_search_agrees_with_bwd_search(
        text in small_alphabet_text(80),
        pat in prop::collection::vec(prop::sample::select(vec![b'a', b'b', b'c']), 0..6),
    ) {
        let st = SuccinctText::with_sample_rate(&text, 8).unwrap();
        prop_assert_eq!(st.fwd_search(&pat), st.bwd_search(&pat));
    }

    #[test]
    fn test_serialization_roundtrip(text in small_alphabet_text(80), rate_pow in 0usize..5) {
        let st = SuccinctText::with_sample_rate(&text, 1 << rate_pow).unwrap();
        let mut bytes = vec![];
        let size = st.serialize_into(&mut bytes).unwrap();
        prop_assert_eq!(size, bytes.len());
        prop_assert_eq!(size, st.size_in_bytes());

        let other = SuccinctText::deserialize_from(&bytes[..]).unwrap();
        prop_assert_eq!(&st, &other);

        let mut bytes2 = vec![];
        other.serialize_into(&mut bytes2).unwrap();
        prop_assert_eq!(bytes, bytes2);

        for pat in [&b"a"[..], b"ab", b"cba", b""] {
            prop_assert_eq!(st.count(pat), other.count(pat));
        }
    }

    #[test]
    fn test_sampling_rates_agree(
        text in small_alphabet_text(80),
        pat in prop::collection::vec(prop::sample::select(vec![b'a', b'b', b'c']), 0..6),
    ) {
        let coarse = SuccinctText::with_sample_rate(&text, 32).unwrap();
        let fine = SuccinctText::with_sample_rate(&text, 2).unwrap();
        prop_assert_eq!(coarse.count(&pat), fine.count(&pat));
        let mut a = coarse.search(&pat);
        let mut b = fine.search(&pat);
        a.sort_unstable();
        b.sort_unstable();
        prop_assert_eq!(a, b);
    }
}
