//! Static mentor directory.
//!
//! Mentor profiles are not served by the backend; the roster ships with the
//! client and only changes with a release.

use serde::Serialize;

/// A mentor profile card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Mentor {
    pub id: &'static str,
    pub slug: &'static str,
    pub name: &'static str,
    pub title: &'static str,
    pub degree: &'static str,
    pub avatar: &'static str,
}

const MENTORS: &[Mentor] = &[
    Mentor {
        id: "phan-huynh-anh",
        slug: "phan-huynh-anh",
        name: "Phan Huỳnh Anh",
        title: "Tiến Sĩ Kinh tế",
        degree: "Chủ tịch HĐQT Công ty Smentor",
        avatar: "/Mentors/PHA.webp",
    },
    Mentor {
        id: "hoang-cuu-long",
        slug: "hoang-cuu-long",
        name: "Hoàng Cửu Long",
        title: "Phó Giáo Sư - Tiến Sĩ",
        degree: "Giảng viên Đại học Kinh tế TP. Hồ Chí Minh",
        avatar: "/Mentors/HCL.webp",
    },
    Mentor {
        id: "doan-duc-minh",
        slug: "doan-duc-minh",
        name: "Đoàn Đức Minh",
        title: "Thạc Sĩ - Nghiên cứu sinh",
        degree: "Giảng viên Đại học Western Sydney",
        avatar: "/Mentors/DDM.webp",
    },
    Mentor {
        id: "nguyen-chi-thanh",
        slug: "nguyen-chi-thanh",
        name: "Nguyễn Chí Thành",
        title: "CEO",
        degree: "Làng Kết nối Kinh doanh VABIX",
        avatar: "/Mentors/NCT.webp",
    },
    Mentor {
        id: "le-nhat-truong-chinh",
        slug: "le-nhat-truong-chinh",
        name: "Lê Nhật Trường Chinh",
        title: "CEO & Founder",
        degree: "SUCCESS Partner Co.Ltd",
        avatar: "/Mentors/LNTC.webp",
    },
    Mentor {
        id: "phan-phat-huy",
        slug: "phan-phat-huy",
        name: "Phan Phát Huy",
        title: "CEO & Founder",
        degree: "HILTOW LANDMARK",
        avatar: "/Mentors/PPH.webp",
    },
];

/// Read-only access to the mentor roster.
pub struct MentorDirectory;

impl MentorDirectory {
    /// All mentors in display order.
    pub fn all() -> &'static [Mentor] {
        MENTORS
    }

    /// Looks up a mentor by id or slug.
    pub fn find(id: &str) -> Option<&'static Mentor> {
        MENTORS.iter().find(|m| m.id == id || m.slug == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_known_mentor() {
        let mentor = MentorDirectory::find("hoang-cuu-long").unwrap();
        assert_eq!(mentor.name, "Hoàng Cửu Long");
    }

    #[test]
    fn test_find_unknown_mentor() {
        assert!(MentorDirectory::find("nobody").is_none());
    }

    #[test]
    fn test_ids_are_unique() {
        let all = MentorDirectory::all();
        for (i, a) in all.iter().enumerate() {
            assert!(all[i + 1..].iter().all(|b| b.id != a.id));
        }
    }
}
