//! Bedtime book library.
//!
//! A fixed set of short bedtime reads the bunny can be seen with. The library
//! is an external collaborator of the mood machine: the dispatcher resolves a
//! book id here, hands the title to the reading animation, and records reading
//! progress in storage.

use crate::domain::error::{Result, SleepBunnyError};

/// A bedtime read with its display metadata and full text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    /// Stable identifier used by commands and reading history.
    pub id: &'static str,
    /// Title shown in the reading view and in status messages.
    pub title: &'static str,
    /// Author or attribution line.
    pub author: &'static str,
    /// Full body text.
    pub content: &'static str,
}

/// Fixed library of bedtime reads.
#[derive(Debug, Clone, Default)]
pub struct BookLibrary;

const BOOKS: &[Book] = &[
    Book {
        id: "moon-rabbit",
        title: "달토끼 이야기",
        author: "전래 동화",
        content: "옛날 옛적, 달에는 떡방아를 찧는 토끼가 살고 있었어요. \
                  토끼는 매일 밤 은은한 달빛 아래에서 콩닥콩닥 방아를 찧었답니다. \
                  구름이 지나가면 잠시 쉬고, 별이 반짝이면 다시 방아를 찧었어요. \
                  오늘 밤에도 달을 올려다보면, 토끼의 방아 소리가 들릴지도 몰라요.",
    },
    Book {
        id: "starlight-meadow",
        title: "별빛 들판",
        author: "수면 동화",
        content: "해가 지고 나면 들판의 풀잎들이 하나둘 별빛을 덮고 잠들어요. \
                  귀뚜라미는 자장가를 연주하고, 바람은 아주 천천히 풀잎을 쓰다듬지요. \
                  들판 한가운데 작은 토끼도 귀를 접고 스르르 눈을 감아요. \
                  별빛이 이불처럼 포근하게 내려앉는 밤이에요.",
    },
    Book {
        id: "cloud-boat",
        title: "구름 배",
        author: "수면 동화",
        content: "잠이 오지 않는 밤이면 구름 배를 타 보세요. \
                  구름 배는 소리 없이 밤하늘을 건너요. \
                  달 항구에 닿으면 꿈의 선장이 따뜻한 담요를 건네준답니다. \
                  배가 흔들흔들, 파도 대신 별빛이 찰랑이는 바다 위에서요.",
    },
    Book {
        id: "goodnight-forest",
        title: "잘 자요, 숲",
        author: "수면 동화",
        content: "숲의 하루가 끝나면 나무들은 서로에게 잘 자라고 인사해요. \
                  다람쥐는 도토리 베개를 베고, 부엉이는 가장 늦게 불을 꺼요. \
                  숲 전체가 고른 숨소리로 가득 차면, 밤안개가 살며시 담요를 덮어 줘요. \
                  잘 자요, 숲. 잘 자요, 당신도.",
    },
];

impl BookLibrary {
    /// Returns every book in the library, in display order.
    #[must_use]
    pub fn all(&self) -> &'static [Book] {
        BOOKS
    }

    /// Looks up a book by id.
    ///
    /// # Errors
    ///
    /// Returns [`SleepBunnyError::UnknownBook`] when the id has no entry.
    pub fn get(&self, id: &str) -> Result<&'static Book> {
        BOOKS
            .iter()
            .find(|book| book.id == id)
            .ok_or_else(|| SleepBunnyError::UnknownBook(id.to_string()))
    }
}
