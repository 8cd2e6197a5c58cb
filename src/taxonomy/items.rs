//! KWCAG 2.2 checklist table: 33 items under 4 principles
//!
//! Each item subsumes the rule IDs listed in `rules`; the mapping is
//! many-rule-to-one-item and rule IDs are globally unique across the table.

use serde::{Deserialize, Serialize};

/// One of the four KWCAG principles, plus the fallback bucket for rules the
/// table does not subsume
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Principle {
    #[serde(rename = "인식의 용이성")]
    Perceivable,
    #[serde(rename = "운용의 용이성")]
    Operable,
    #[serde(rename = "이해의 용이성")]
    Understandable,
    #[serde(rename = "견고성")]
    Robust,
    #[serde(rename = "기타")]
    Other,
}

impl Principle {
    pub fn as_str(&self) -> &'static str {
        match self {
            Principle::Perceivable => "인식의 용이성",
            Principle::Operable => "운용의 용이성",
            Principle::Understandable => "이해의 용이성",
            Principle::Robust => "견고성",
            Principle::Other => "기타",
        }
    }
}

impl std::fmt::Display for Principle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How much of an item automated tooling can verify; drives the cost
/// model's base remediation time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AutomationLevel {
    High,
    Medium,
    Manual,
}

/// One KWCAG checklist item
#[derive(Debug, Clone, Copy)]
pub struct KwcagItem {
    pub id: &'static str,
    pub principle: Principle,
    pub guideline: &'static str,
    pub check_item: &'static str,
    pub rules: &'static [&'static str],
    pub automation_level: AutomationLevel,
    pub description: &'static str,
    pub help: &'static str,
}

/// Sentinel checklist ID for findings outside the table
pub const UNMAPPED_ID: &str = "기타";

/// Sentinel checklist name for findings outside the table
pub const UNMAPPED_NAME: &str = "기타 접근성 지침 (WCAG)";

pub const KWCAG_ITEMS: &[KwcagItem] = &[
    // 1. 인식의 용이성 (9개 항목)
    KwcagItem {
        id: "1.1.1",
        principle: Principle::Perceivable,
        guideline: "적절한 대체 텍스트 제공",
        check_item: "적절한 대체 텍스트 제공",
        rules: &["image-alt", "input-image-alt", "object-alt", "area-alt", "svg-img-alt"],
        automation_level: AutomationLevel::High,
        description: "텍스트 아닌 콘텐츠에는 그 의미나 용도를 인식할 수 있도록 대체 텍스트를 제공해야 한다.",
        help: "이미지, 버튼 등 텍스트가 없는 요소에 적절한 alt 속성이나 레이블을 제공하세요.",
    },
    KwcagItem {
        id: "1.2.1",
        principle: Principle::Perceivable,
        guideline: "자막 제공",
        check_item: "자막 제공",
        rules: &["video-caption"],
        automation_level: AutomationLevel::Medium,
        description: "멀티미디어 콘텐츠에는 자막, 대본 또는 수어를 제공해야 한다.",
        help: "동영상 및 오디오 콘텐츠에 동기화된 자막 혹은 텍스트 대본을 제공하세요.",
    },
    KwcagItem {
        id: "1.2.2",
        principle: Principle::Perceivable,
        guideline: "수어 제공",
        check_item: "수어 제공",
        rules: &[],
        automation_level: AutomationLevel::Manual,
        description: "이해하기 어려운 멀티미디어 콘텐츠에는 수어를 제공해야 한다.",
        help: "청각 장애 사용자를 위해 주요 영상 콘텐츠에 수어 통역을 포함하는 것을 고려하세요.",
    },
    KwcagItem {
        id: "1.3.1",
        principle: Principle::Perceivable,
        guideline: "콘텐츠의 선형화",
        check_item: "콘텐츠의 선형화",
        rules: &["heading-order", "list", "definition-list", "table-fake-caption", "listitem"],
        automation_level: AutomationLevel::Medium,
        description: "콘텐츠는 논리적인 순서로 제공해야 한다.",
        help: "제목 계층구조(h1~h6)를 논리적으로 구성하고, 시각적 순서와 마크업 순서를 일치시키세요.",
    },
    KwcagItem {
        id: "1.3.2",
        principle: Principle::Perceivable,
        guideline: "표의 구성",
        check_item: "표의 구성",
        rules: &["table-caption", "td-has-header", "scope-attr-valid", "th-has-data-cells"],
        automation_level: AutomationLevel::High,
        description: "표는 이해하기 쉽게 구성해야 한다.",
        help: "데이터 표에는 caption 또는 summary를 제공하고, th와 scope 속성을 사용하여 제목 셀과 데이터 셀을 연결하세요.",
    },
    KwcagItem {
        id: "1.4.1",
        principle: Principle::Perceivable,
        guideline: "명도 대비",
        check_item: "명도 대비",
        rules: &["color-contrast", "color-contrast-enhanced"],
        automation_level: AutomationLevel::High,
        description: "텍스트와 배경 간의 명도 대비는 4.5:1 이상이어야 한다.",
        help: "텍스트와 배경의 색상 대비를 높여 시력이 낮은 사용자도 읽을 수 있도록 수정하세요. (4.5:1 이상 권장)",
    },
    KwcagItem {
        id: "1.4.2",
        principle: Principle::Perceivable,
        guideline: "색에 무관한 콘텐츠 인식",
        check_item: "색에 무관한 콘텐츠 인식",
        rules: &["link-in-text-block"],
        automation_level: AutomationLevel::Manual,
        description: "색상만으로 정보를 제공하지 않아야 한다.",
        help: "상태 변화나 중요 정보를 전달할 때 색상 외에 패턴, 밑줄, 텍스트 등을 병기하세요.",
    },
    KwcagItem {
        id: "1.4.3",
        principle: Principle::Perceivable,
        guideline: "배경음 사용 금지",
        check_item: "배경음 사용 금지",
        rules: &["no-autoplay-audio"],
        automation_level: AutomationLevel::Medium,
        description: "자동 재생되는 배경음을 사용하지 않아야 한다.",
        help: "페이지 접속 시 자동으로 소리가 재생되지 않게 하거나, 3초 이내에 정지할 수 있는 제어 수단을 제공하세요.",
    },
    KwcagItem {
        id: "1.4.4",
        principle: Principle::Perceivable,
        guideline: "콘텐츠 간의 구분",
        check_item: "콘텐츠 간의 구분",
        rules: &[],
        automation_level: AutomationLevel::Manual,
        description: "이웃한 콘텐츠는 구별될 수 있어야 한다.",
        help: "테두리, 여백, 구분선 등을 사용하여 인접한 UI 요소들이 시각적으로 구분되도록 하세요.",
    },
    // 2. 운용의 용이성 (15개 항목)
    KwcagItem {
        id: "2.1.1",
        principle: Principle::Operable,
        guideline: "키보드 사용 보장",
        check_item: "키보드 사용 보장",
        rules: &["accesskeys", "tabindex", "scrollable-region-focusable"],
        automation_level: AutomationLevel::Medium,
        description: "모든 기능은 키보드만으로도 사용할 수 있어야 한다.",
        help: "모든 클릭 가능한 요소가 키보드 Tab키로 접근 가능하고 Enter/Space로 실행될 수 있도록 하세요.",
    },
    KwcagItem {
        id: "2.1.2",
        principle: Principle::Operable,
        guideline: "초점 이동과 표시",
        check_item: "초점 이동과 표시",
        rules: &["focus-order-semantics"],
        automation_level: AutomationLevel::Medium,
        description: "키보드에 의한 초점은 논리적으로 이동해야 하며 시각적으로 구별할 수 있어야 한다.",
        help: "초점(Focus)이 이동할 때 순서가 논리적이어야 하며, 현재 어디에 초점이 있는지 명확한 테두리 등을 표시하세요.",
    },
    KwcagItem {
        id: "2.1.3",
        principle: Principle::Operable,
        guideline: "조작 가능",
        check_item: "조작 가능",
        rules: &["button-name", "aria-hidden-focus", "nested-interactive"],
        automation_level: AutomationLevel::High,
        description: "사용자 입력 및 컨트롤은 조작 가능하도록 제공되어야 한다.",
        help: "버튼과 링크 등에 명확한 이름(네임)을 제공하고, 너무 작은 클릭 영역은 키우세요.",
    },
    KwcagItem {
        id: "2.1.4",
        principle: Principle::Operable,
        guideline: "문자 단축키",
        check_item: "문자 단축키",
        rules: &[],
        automation_level: AutomationLevel::Manual,
        description: "문자 단축키는 오동작으로 인한 오류를 방지해야 한다.",
        help: "단일 문자 단축키 사용 시 이를 해제하거나 변경할 수 있는 기능을 제공하세요.",
    },
    KwcagItem {
        id: "2.2.1",
        principle: Principle::Operable,
        guideline: "응답 시간 조절",
        check_item: "응답 시간 조절",
        rules: &["meta-refresh"],
        automation_level: AutomationLevel::Medium,
        description: "시간제한이 있는 콘텐츠는 응답시간을 조절할 수 있어야 한다.",
        help: "로그인 연장 기능과 같이 시간 제한을 사용자가 연장하거나 해제할 수 있는 수단을 제공하세요.",
    },
    KwcagItem {
        id: "2.2.2",
        principle: Principle::Operable,
        guideline: "정지 기능 제공",
        check_item: "정지 기능 제공",
        rules: &["blink", "marquee"],
        automation_level: AutomationLevel::High,
        description: "자동으로 변경되는 콘텐츠는 움직임을 제어할 수 있어야 한다.",
        help: "자동 재생되는 슬라이드나 배너에 정지/일시정지 버튼을 제공하세요.",
    },
    KwcagItem {
        id: "2.3.1",
        principle: Principle::Operable,
        guideline: "깜빡임과 번쩍임 사용 제한",
        check_item: "깜빡임과 번쩍임 사용 제한",
        rules: &[],
        automation_level: AutomationLevel::Manual,
        description: "초당 3~50회 주기로 깜빡이거나 번쩍이는 콘텐츠를 제공하지 않아야 한다.",
        help: "광과민성 발작을 일으킬 수 있는 과도한 깜빡임 효과를 제거하세요.",
    },
    KwcagItem {
        id: "2.4.1",
        principle: Principle::Operable,
        guideline: "반복 영역 건너뛰기",
        check_item: "반복 영역 건너뛰기",
        rules: &["bypass", "skip-link", "region"],
        automation_level: AutomationLevel::High,
        description: "콘텐츠의 반복되는 영역은 건너뛸 수 있어야 한다.",
        help: "메인 콘텐츠로 바로 이동할 수 있는 스킵 네비게이션(본문 바로가기) 링크를 최상단에 제공하세요.",
    },
    KwcagItem {
        id: "2.4.2",
        principle: Principle::Operable,
        guideline: "페이지 제목 제공",
        check_item: "페이지 제목 제공",
        rules: &["document-title", "page-has-heading-one", "frame-title"],
        automation_level: AutomationLevel::High,
        description: "페이지, 프레임, 콘텐츠 블록에는 적절한 제목을 제공해야 한다.",
        help: "각 <title> 태그에 페이지 특성을 담은 제목을 넣고, iframe 등에도 title 속성을 제공하세요.",
    },
    KwcagItem {
        id: "2.4.3",
        principle: Principle::Operable,
        guideline: "적절한 링크 텍스트",
        check_item: "적절한 링크 텍스트",
        rules: &["link-name", "identical-links-same-purpose"],
        automation_level: AutomationLevel::High,
        description: "링크 텍스트는 용도나 목적을 이해할 수 있도록 제공해야 한다.",
        help: "\"더보기\"와 같이 모호한 텍스트 대신 \"공지사항 더보기\"와 같이 목적이 명확한 링크 텍스트를 제공하세요.",
    },
    KwcagItem {
        id: "2.4.4",
        principle: Principle::Operable,
        guideline: "고정된 참조 위치 정보",
        check_item: "고정된 참조 위치 정보",
        rules: &[],
        automation_level: AutomationLevel::Manual,
        description: "전자출판문서 형식의 웹 페이지는 각 페이지로 이동할 수 있는 기능이 있어야 한다.",
        help: "문서 내에서 목차나 페이지 이동 기능을 제공하여 접근성을 높이세요.",
    },
    KwcagItem {
        id: "2.5.1",
        principle: Principle::Operable,
        guideline: "단일 포인터 입력 지원",
        check_item: "단일 포인터 입력 지원",
        rules: &[],
        automation_level: AutomationLevel::Manual,
        description: "다중 포인터 또는 경로 기반 동작은 단일 포인터로도 조작할 수 있어야 한다.",
        help: "두 손가락 줌인/아웃 등의 동작 외에도 버튼 클릭만으로 동일한 기능을 수행할 수 있게 하세요.",
    },
    KwcagItem {
        id: "2.5.2",
        principle: Principle::Operable,
        guideline: "포인터 입력 취소",
        check_item: "포인터 입력 취소",
        rules: &[],
        automation_level: AutomationLevel::Manual,
        description: "포인터의 다운 이벤트로 실행된 기능은 취소할 수 있어야 한다.",
        help: "마우스 왼쪽 버튼을 뗄 때 기능이 실행되도록 하거나, 드래그 중에 취소할 수 있도록 구현하세요.",
    },
    KwcagItem {
        id: "2.5.3",
        principle: Principle::Operable,
        guideline: "레이블과 네임",
        check_item: "레이블과 네임",
        rules: &["label-content-name-mismatch"],
        automation_level: AutomationLevel::High,
        description: "텍스트 또는 텍스트 이미지가 포함된 레이블이 있는 사용자 인터페이스 구성요소는 네임에 시각적으로 표시되는 텍스트를 포함해야 한다.",
        help: "시각적으로 보이는 텍스트와 스크린 리더가 읽어주는 aria-label 등의 텍스트를 일치시키세요.",
    },
    KwcagItem {
        id: "2.5.4",
        principle: Principle::Operable,
        guideline: "동작기반 작동",
        check_item: "동작기반 작동",
        rules: &[],
        automation_level: AutomationLevel::Manual,
        description: "기기의 움직임이나 사용자의 움직임으로 동작되는 기능은 대체 수단을 제공해야 한다.",
        help: "스마트폰을 흔들어 취소하는 기능 외에도 화면상에 취소 버튼을 별도로 제공하세요.",
    },
    // 3. 이해의 용이성 (7개 항목)
    KwcagItem {
        id: "3.1.1",
        principle: Principle::Understandable,
        guideline: "기본 언어 표시",
        check_item: "기본 언어 표시",
        rules: &["html-has-lang", "html-lang-valid", "valid-lang"],
        automation_level: AutomationLevel::High,
        description: "주로 사용하는 언어를 명시해야 한다.",
        help: "<html lang=\"ko\">와 같이 문서의 기본 언어를 속성으로 명시하세요.",
    },
    KwcagItem {
        id: "3.2.1",
        principle: Principle::Understandable,
        guideline: "사용자 요구에 따른 실행",
        check_item: "사용자 요구에 따른 실행",
        rules: &["select-name"],
        automation_level: AutomationLevel::Medium,
        description: "사용자가 의도하지 않은 기능이 실행되지 않아야 한다.",
        help: "초점을 받았을 때 갑자기 창이 열리거나 폼이 제출되는 등 예기치 않은 동작을 방지하세요.",
    },
    KwcagItem {
        id: "3.3.1",
        principle: Principle::Understandable,
        guideline: "콘텐츠의 선형 구조",
        check_item: "콘텐츠의 선형 구조",
        rules: &["presentation-role-conflict"],
        automation_level: AutomationLevel::Medium,
        description: "콘텐츠는 논리적인 순서로 제공해야 한다.",
        help: "DOM 순서와 탭 순서를 일치시켜 논리적인 흐름으로 콘텐츠를 제공하세요.",
    },
    KwcagItem {
        id: "3.4.1",
        principle: Principle::Understandable,
        guideline: "오류 정정",
        check_item: "오류 정정",
        rules: &["aria-input-field-name", "autocomplete-valid"],
        automation_level: AutomationLevel::Medium,
        description: "입력 오류를 정정할 수 있는 방법을 제공해야 한다.",
        help: "입력 오류 발생 시 명확한 메시지를 제공하고 다시 입력할 수 있는 안내를 충분히 제공하세요.",
    },
    KwcagItem {
        id: "3.4.2",
        principle: Principle::Understandable,
        guideline: "레이블 제공",
        check_item: "레이블 제공",
        rules: &["label", "form-field-multiple-labels", "input-button-name"],
        automation_level: AutomationLevel::High,
        description: "사용자 입력에는 대응하는 레이블을 제공해야 한다.",
        help: "<input> 요소에 대응하는 <label> 태그를 제공하고 id/for 속성으로 연결하세요.",
    },
    KwcagItem {
        id: "3.4.3",
        principle: Principle::Understandable,
        guideline: "접근 가능한 인증",
        check_item: "접근 가능한 인증",
        rules: &[],
        automation_level: AutomationLevel::Manual,
        description: "인증 과정은 인지 기능 테스트에만 의존하지 않아야 한다.",
        help: "복잡한 계산이나 퍼즐 외에도 이메일 인증 등 대체 인증 수단을 제공하세요.",
    },
    KwcagItem {
        id: "3.4.4",
        principle: Principle::Understandable,
        guideline: "반복 입력 정보",
        check_item: "반복 입력 정보",
        rules: &[],
        automation_level: AutomationLevel::Manual,
        description: "반복되는 입력 정보는 자동 입력 또는 선택 입력할 수 있어야 한다.",
        help: "사용자가 이전에 입력한 정보를 다시 활용할 수 있도록 자동 완성 기능을 제공하세요.",
    },
    // 4. 견고성 (2개 항목)
    KwcagItem {
        id: "4.1.1",
        principle: Principle::Robust,
        guideline: "마크업 오류 방지",
        check_item: "마크업 오류 방지",
        rules: &["duplicate-id", "duplicate-id-active", "duplicate-id-aria"],
        automation_level: AutomationLevel::High,
        description: "마크업 언어의 요소는 열고 닫음, 중첩 관계 및 속성 선언에 오류가 없어야 한다.",
        help: "id 중복을 피하고 태그의 중첩 관계(부모/자식)가 올바른지 확인하세요.",
    },
    KwcagItem {
        id: "4.1.2",
        principle: Principle::Robust,
        guideline: "웹 애플리케이션 접근성 준수",
        check_item: "웹 애플리케이션 접근성 준수",
        rules: &[
            "aria-allowed-attr",
            "aria-allowed-role",
            "aria-hidden-body",
            "aria-required-attr",
            "aria-required-children",
            "aria-required-parent",
            "aria-roles",
            "aria-valid-attr",
            "aria-valid-attr-value",
            "custom-aria-tab-missing-selected",
            "custom-aria-tab-missing-controls",
            "custom-aria-checkbox-missing-checked",
            "custom-aria-radio-missing-checked",
            "custom-aria-slider-missing-values",
            "custom-aria-button-invalid-pressed",
        ],
        automation_level: AutomationLevel::High,
        description: "웹 애플리케이션은 접근성이 있어야 한다.",
        help: "정해진 ARIA 속성을 올바르게 사용하고 시맨틱 태그를 우선적으로 사용하세요.",
    },
];
