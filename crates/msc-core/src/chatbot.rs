//! Scripted assistant replies.
//!
//! The assistant is not a language model: it classifies the input into a
//! small set of intents by keyword and answers with one of several canned
//! replies. Reply selection goes through [`ReplyPicker`] so tests can pin
//! the choice.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// First message shown in a fresh conversation.
pub const WELCOME_MESSAGE: &str = "Xin chào! Tôi là MSC Assistant 🤖\n\nTôi có thể giúp bạn:\n• Tìm hiểu về các khóa học\n• Thông tin về mentors\n• Hỗ trợ kỹ thuật\n• Tư vấn lộ trình học tập\n\nBạn cần hỗ trợ gì hôm nay?";

const GREETING_REPLIES: &[&str] = &[
    "Xin chào! Tôi có thể giúp gì cho bạn? 😊",
    "Chào bạn! Rất vui được hỗ trợ bạn hôm nay! 🌟",
    "Hello! Tôi là MSC Assistant, sẵn sàng giúp đỡ bạn! 🤖",
];

const THANKS_REPLIES: &[&str] = &[
    "Không có gì! Tôi luôn sẵn sàng hỗ trợ bạn! 😊",
    "Rất vui được giúp đỡ bạn! Còn gì khác không? 🌟",
    "Cảm ơn bạn! Hãy liên hệ bất cứ khi nào cần hỗ trợ! 💙",
];

const FALLBACK_REPLIES: &[&str] = &[
    "Tôi hiểu bạn đang quan tâm về vấn đề này. Để được hỗ trợ tốt nhất, bạn có thể:\n\n📞 Gọi hotline: (+84) 329 381 489\n📧 Email: msc.edu.vn@gmail.com\n💬 Chat với tư vấn viên\n\nHoặc chọn một trong các câu hỏi phổ biến bên dưới! 👇",
    "Cảm ơn bạn đã liên hệ! Tôi sẽ chuyển yêu cầu của bạn đến đội ngũ chuyên môn để được hỗ trợ tốt nhất.\n\nTrong lúc chờ đợi, bạn có thể tham khảo:\n📚 Khóa học: /dao-tao\n👨‍🏫 Mentors: /mentors\n📝 Blog: /chia-se",
    "Tôi đang học hỏi thêm để trả lời câu hỏi này tốt hơn! 🤖\n\nHiện tại, bạn có thể:\n• Liên hệ trực tiếp qua hotline\n• Gửi email chi tiết\n• Đặt lịch tư vấn miễn phí\n\nTeam MSC sẽ phản hồi trong 24h! ⚡",
];

/// A suggested question with a fixed answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuickReply {
    pub id: &'static str,
    pub text: &'static str,
    pub response: &'static str,
}

pub const QUICK_REPLIES: &[QuickReply] = &[
    QuickReply {
        id: "courses",
        text: "📚 Khóa học nào phù hợp với tôi?",
        response: "Tuyệt vời! Để tư vấn khóa học phù hợp nhất, bạn có thể cho tôi biết:\n\n🎯 Mục tiêu học tập của bạn?\n💼 Kinh nghiệm hiện tại?\n⏰ Thời gian có thể dành để học?\n\nHoặc bạn có thể xem danh sách khóa học tại mục Đào tạo",
    },
    QuickReply {
        id: "mentors",
        text: "👨‍🏫 Thông tin về mentors",
        response: "MSC Center có đội ngũ mentors giàu kinh nghiệm:\n\n⭐ 50+ mentors chuyên nghiệp\n🏢 Từ các công ty hàng đầu\n🎓 Kinh nghiệm 5-15 năm\n💡 Chuyên môn đa dạng\n\nXem chi tiết tại: /mentors\n\nBạn muốn tìm mentor theo lĩnh vực nào?",
    },
    QuickReply {
        id: "support",
        text: "🔧 Hỗ trợ kỹ thuật",
        response: "Tôi có thể hỗ trợ bạn:\n\n🔐 Vấn đề đăng nhập\n📱 Lỗi trên mobile/desktop\n🎥 Không xem được video\n📊 Theo dõi tiến độ học\n💳 Thanh toán khóa học\n\nVui lòng mô tả chi tiết vấn đề bạn gặp phải!",
    },
];

/// Looks up a quick reply by id.
pub fn quick_reply(id: &str) -> Option<&'static QuickReply> {
    QUICK_REPLIES.iter().find(|r| r.id == id)
}

/// What the person is trying to say.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Greeting,
    Thanks,
    Other,
}

impl Intent {
    /// Classifies free text. Greetings win over thanks.
    pub fn classify(text: &str) -> Self {
        let message = text.to_lowercase();
        let has_word = |word: &str| {
            message
                .split(|c: char| !c.is_alphanumeric())
                .any(|token| token == word)
        };

        if message.contains("xin chào") || message.contains("hello") || has_word("hi") {
            return Intent::Greeting;
        }
        if message.contains("cảm ơn") || message.contains("thanks") || message.contains("thank you")
        {
            return Intent::Thanks;
        }
        Intent::Other
    }

    fn replies(self) -> &'static [&'static str] {
        match self {
            Intent::Greeting => GREETING_REPLIES,
            Intent::Thanks => THANKS_REPLIES,
            Intent::Other => FALLBACK_REPLIES,
        }
    }
}

/// Source of the index used to choose among canned replies.
pub trait ReplyPicker: Send {
    /// Returns an index in `0..len`. `len` is never zero.
    fn pick(&mut self, len: usize) -> usize;
}

/// Picks uniformly with a `rand` generator.
pub struct RngPicker<R>(pub R);

impl RngPicker<StdRng> {
    pub fn from_entropy() -> Self {
        Self(StdRng::from_entropy())
    }

    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng + Send> ReplyPicker for RngPicker<R> {
    fn pick(&mut self, len: usize) -> usize {
        self.0.gen_range(0..len)
    }
}

/// Always picks the same index (clamped to the available replies).
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedPicker(pub usize);

impl ReplyPicker for FixedPicker {
    fn pick(&mut self, len: usize) -> usize {
        self.0.min(len - 1)
    }
}

/// Chooses the assistant's answer to `text`.
pub fn bot_reply(text: &str, picker: &mut dyn ReplyPicker) -> &'static str {
    let replies = Intent::classify(text).replies();
    let index = picker.pick(replies.len()).min(replies.len() - 1);
    replies[index]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_intents() {
        assert_eq!(Intent::classify("Xin chào MSC"), Intent::Greeting);
        assert_eq!(Intent::classify("HELLO there"), Intent::Greeting);
        assert_eq!(Intent::classify("hi!"), Intent::Greeting);
        assert_eq!(Intent::classify("Cảm ơn nhiều"), Intent::Thanks);
        assert_eq!(Intent::classify("thank you"), Intent::Thanks);
        assert_eq!(Intent::classify("học phí bao nhiêu?"), Intent::Other);
    }

    #[test]
    fn test_hi_only_matches_whole_word() {
        assert_eq!(Intent::classify("nothing here"), Intent::Other);
        assert_eq!(Intent::classify("think"), Intent::Other);
        assert_eq!(Intent::classify("this course?"), Intent::Other);
        assert_eq!(Intent::classify("Hi, MSC"), Intent::Greeting);
    }

    #[test]
    fn test_fixed_picker_selects_reply() {
        assert_eq!(bot_reply("hello", &mut FixedPicker(1)), GREETING_REPLIES[1]);
        assert_eq!(bot_reply("thanks", &mut FixedPicker(0)), THANKS_REPLIES[0]);
        assert_eq!(bot_reply("???", &mut FixedPicker(99)), FALLBACK_REPLIES[2]);
    }

    #[test]
    fn test_seeded_picker_is_deterministic() {
        let a: Vec<_> = (0..5)
            .map(|_| "x")
            .scan(RngPicker::seeded(7), |p, t| Some(bot_reply(t, p)))
            .collect();
        let b: Vec<_> = (0..5)
            .map(|_| "x")
            .scan(RngPicker::seeded(7), |p, t| Some(bot_reply(t, p)))
            .collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_quick_reply_lookup() {
        assert!(quick_reply("mentors").unwrap().response.contains("/mentors"));
        assert!(quick_reply("unknown").is_none());
    }
}
