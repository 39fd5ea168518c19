//! Province lookup over the layered gazetteer.
//!
//! Tiers are consulted in order and the first province with any alias present
//! in the text wins. Inside one province the longest alias is tried first and
//! its rightmost occurrence is reported: notices tend to name the head office
//! first and the project site last.
//!
//! Positions are never compared across provinces. If two provinces of the same
//! tier both occur, the one listed first in the dataset wins.

use tender_types::ProvinceMatch;

use crate::gazetteer::Gazetteer;

/// Resolve `text` to a province name.
pub fn locate_province<'g>(text: &str, gazetteer: &'g Gazetteer) -> Option<&'g str> {
    locate_in(text, gazetteer).map(|hit| hit.province)
}

/// Like [`locate_province`], but reports which tier and alias matched.
pub fn locate_match(text: &str, gazetteer: &Gazetteer) -> Option<ProvinceMatch> {
    locate_in(text, gazetteer).map(|hit| ProvinceMatch {
        province: hit.province.to_string(),
        tier: hit.tier.to_string(),
        alias: hit.alias.to_string(),
        char_offset: text[..hit.byte_offset].chars().count(),
    })
}

struct Hit<'g> {
    province: &'g str,
    tier: &'g str,
    alias: &'g str,
    byte_offset: usize,
}

fn locate_in<'g>(text: &str, gazetteer: &'g Gazetteer) -> Option<Hit<'g>> {
    if text.is_empty() {
        return None;
    }

    for tier in gazetteer.tiers() {
        for entry in &tier.provinces {
            for alias in entry.aliases() {
                if let Some(byte_offset) = text.rfind(alias.as_str()) {
                    return Some(Hit {
                        province: &entry.province,
                        tier: &tier.name,
                        alias,
                        byte_offset,
                    });
                }
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gazetteer::{ProvinceEntry, Tier};
    use tender_types::LocationSet;

    fn multi(province: &str, aliases: &[&str]) -> ProvinceEntry {
        ProvinceEntry::new(
            province,
            LocationSet::MultiAlias(aliases.iter().map(|a| a.to_string()).collect()),
        )
    }

    fn single(province: &str, alias: &str) -> ProvinceEntry {
        ProvinceEntry::new(province, LocationSet::SingleAlias(alias.to_string()))
    }

    fn sample() -> Gazetteer {
        Gazetteer::new(vec![
            Tier::new(
                "省市",
                vec![
                    multi("江苏", &["江苏省", "南京市", "苏州市"]),
                    multi("浙江", &["浙江省", "杭州市"]),
                ],
            ),
            Tier::new(
                "省市简",
                vec![multi("江苏", &["南京", "苏州"]), multi("浙江", &["杭州"])],
            ),
            Tier::new(
                "省",
                vec![
                    single("江苏", "江苏"),
                    single("浙江", "浙江"),
                    single("上海", "上海"),
                ],
            ),
        ])
    }

    #[test]
    fn test_empty_text() {
        assert_eq!(locate_province("", &sample()), None);
        assert_eq!(locate_match("", &sample()), None);
    }

    #[test]
    fn test_empty_gazetteer() {
        assert_eq!(locate_province("南京市政工程", &Gazetteer::default()), None);
    }

    #[test]
    fn test_no_alias_present() {
        assert_eq!(locate_province("某单位办公楼改造工程招标公告", &sample()), None);
    }

    #[test]
    fn test_rightmost_occurrence_of_alias() {
        let text = "南京市采购中心发布，项目位于南京市江宁区";
        let m = locate_match(text, &sample()).unwrap();
        assert_eq!(m.province, "江苏");
        assert_eq!(m.tier, "省市");
        assert_eq!(m.alias, "南京市");
        assert_eq!(m.char_offset, 14);
    }

    #[test]
    fn test_longer_alias_tried_first_within_province() {
        let gaz = Gazetteer::new(vec![Tier::new(
            "省市简",
            vec![multi("江苏", &["南京", "南京江北新区"])],
        )]);
        // the short alias occurs later, but the long one is tried first
        let m = locate_match("南京江北新区项目，南京分公司负责", &gaz).unwrap();
        assert_eq!(m.alias, "南京江北新区");
        assert_eq!(m.char_offset, 0);

        // shorter alias first, longer one later in the text
        let m = locate_match("南京分公司承接南京江北新区项目", &gaz).unwrap();
        assert_eq!(m.province, "江苏");
        assert_eq!(m.alias, "南京江北新区");
        assert_eq!(m.char_offset, 7);
    }

    #[test]
    fn test_tier_outranks_position() {
        // "浙江" (tier 省) is later in the text than "苏州市" (tier 省市)
        let text = "苏州市某公司中标浙江";
        let m = locate_match(text, &sample()).unwrap();
        assert_eq!(m.province, "江苏");
        assert_eq!(m.tier, "省市");
    }

    #[test]
    fn test_first_province_in_tier_wins() {
        // both provinces match at tier 省; 江苏 is listed first
        let text = "江苏某公司承接浙江项目";
        assert_eq!(locate_province(text, &sample()), Some("江苏"));
    }

    #[test]
    fn test_later_mention_resolves_when_earlier_is_coarser() {
        let text = "上海市浦东新区招标，最终确定由江苏省某建设集团（分公司）承建";
        let m = locate_match(text, &sample()).unwrap();
        assert_eq!(m.province, "江苏");
        assert_eq!(m.alias, "江苏省");
    }

    #[test]
    fn test_bundled_city_names_inside_other_names() {
        let gaz = crate::gazetteer::bundled();
        let m = locate_match("安徽省马鞍山市雨山区道路改造工程", &gaz).unwrap();
        assert_eq!(m.province, "安徽");
        assert_eq!(m.alias, "马鞍山市");
        assert_eq!(locate_province("辽宁鞍山市立山区供热改造", &gaz), Some("辽宁"));
        assert_eq!(locate_province("大兴安岭林区防火通道工程", &gaz), Some("黑龙江"));
    }

    #[test]
    fn test_single_alias_tier() {
        let text = "上海某工程";
        let m = locate_match(text, &sample()).unwrap();
        assert_eq!(m.province, "上海");
        assert_eq!(m.tier, "省");
    }
}
