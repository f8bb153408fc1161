//! Built-in sample directory, shown when the configured source cannot be read.

use crate::model::Record;

#[allow(clippy::too_many_arguments)]
fn entry(
    id: &str,
    name: &str,
    description: &str,
    location: &str,
    region: &str,
    services: &[&str],
    focus_groups: &[&str],
    flagged: bool,
    phone: &str,
    email: &str,
) -> Record {
    Record::new(id, name)
        .with_description(description)
        .with_location(location)
        .with_region(region)
        .with_services(services.iter().copied())
        .with_focus_groups(focus_groups.iter().copied())
        .flagged(flagged)
        .with_contact(Some(phone.to_string()), Some(email.to_string()))
}

pub fn sample_records() -> Vec<Record> {
    vec![
        entry(
            "1",
            "Women Empowerment Alliance",
            "Safe housing, skill development, legal assistance and career guidance for women from marginalized communities.",
            "123 Empowerment Street, Mumbai",
            "Maharashtra",
            &["Housing", "Employment", "Legal Support"],
            &["women"],
            true,
            "+91 22 4000 1001",
            "contact@womenempower.org",
        ),
        entry(
            "2",
            "Trans Rights Foundation",
            "Healthcare access, legal rights awareness, safe housing and community building for transgender people.",
            "456 Equality Avenue, Delhi",
            "Delhi",
            &["Healthcare", "Legal Support", "Housing"],
            &["transgender"],
            true,
            "+91 11 4000 1002",
            "help@transrights.org",
        ),
        entry(
            "3",
            "Safe Space Collective",
            "Safe shelters, counseling and emergency support for women and transgender people in crisis.",
            "789 Safety Lane, Bangalore",
            "Karnataka",
            &["Emergency Housing", "Mental Health", "Crisis Support"],
            &["women", "transgender"],
            true,
            "+91 80 4000 1003",
            "safety@safespace.org",
        ),
        entry(
            "4",
            "Healthcare Access Initiative",
            "Gender-affirming healthcare, mental health services and specialized medical care.",
            "321 Wellness Road, Chennai",
            "Tamil Nadu",
            &["Healthcare", "Trans Health", "Counseling"],
            &["women", "transgender"],
            false,
            "+91 44 4000 1004",
            "care@healthaccess.org",
        ),
        entry(
            "5",
            "Legal Aid Network",
            "Free legal assistance, documentation support and rights advocacy for people facing discrimination.",
            "654 Justice Boulevard, Hyderabad",
            "Telangana",
            &["Legal Support", "Rights Advocacy", "Documentation"],
            &["women", "transgender"],
            true,
            "+91 40 4000 1005",
            "legal@rightsdefenders.org",
        ),
        entry(
            "6",
            "Community Haven Project",
            "Transitional housing, community support and skill-building programs for people rebuilding their lives.",
            "987 Community Circle, Kolkata",
            "West Bengal",
            &["Transitional Housing", "Skill Development", "Community"],
            &["women", "transgender"],
            true,
            "+91 33 4000 1006",
            "community@havenproject.org",
        ),
        entry(
            "7",
            "Women's Education Foundation",
            "Education and literacy among women through scholarships, vocational training and adult education.",
            "555 Learning Lane, Pune",
            "Maharashtra",
            &["Education", "Scholarships", "Vocational Training"],
            &["women"],
            false,
            "+91 20 4000 1007",
            "info@womensedu.org",
        ),
        entry(
            "8",
            "Trans Employment Network",
            "Employment opportunities, career counseling and workplace inclusion training for employers.",
            "777 Career Avenue, Ahmedabad",
            "Gujarat",
            &["Employment", "Career Counseling", "Workplace Training"],
            &["transgender"],
            false,
            "+91 79 4000 1008",
            "jobs@transemployment.org",
        ),
        entry(
            "9",
            "Women's Health Initiative",
            "Reproductive health, maternal care and preventive screenings for women.",
            "222 Wellness Street, Jaipur",
            "Rajasthan",
            &["Healthcare", "Reproductive Health", "Maternal Care"],
            &["women"],
            true,
            "+91 141 400 1009",
            "health@womensinitiative.org",
        ),
        entry(
            "10",
            "Transgender Support Alliance",
            "Housing assistance, healthcare navigation and community events.",
            "444 Support Boulevard, Lucknow",
            "Uttar Pradesh",
            &["Housing", "Healthcare", "Community Building"],
            &["transgender"],
            true,
            "+91 522 400 1010",
            "support@transalliance.org",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::normalize::check_unique;

    #[test]
    fn sample_ids_are_unique() {
        let records = sample_records();
        assert_eq!(records.len(), 10);
        check_unique(&records).unwrap();
    }

    #[test]
    fn exactly_one_sample_is_in_delhi() {
        let delhi = sample_records()
            .into_iter()
            .filter(|r| r.region.as_deref() == Some("Delhi"))
            .count();
        assert_eq!(delhi, 1);
    }
}
