//! The warehouse-system proposal deck.
//!
//! Ten fixed slides of declarative content rendered through the geometry
//! helper. Every coordinate is an explicit inch literal on the template
//! canvas; the builders share nothing but the deck they append to, so each
//! slide can be regenerated or reordered independently.

use crate::pptx::deck::Deck;
use crate::pptx::error::Result;
use crate::pptx::geometry::{MARGIN_TOP, Rect};
use crate::pptx::shapes::Align;

/// A slide builder appends one finished slide to the deck.
pub type SlideBuilder = fn(&mut Deck) -> Result<()>;

/// The deck in presentation order, labeled for progress reporting.
pub const SLIDES: [(&str, SlideBuilder); 10] = [
    ("Title", title),
    ("目的", purpose),
    ("現状の課題", issues),
    ("解決の方向性", solution),
    ("システム構成イメージ", system_overview),
    ("現場の作業効率化", efficiency),
    ("どこからでも状況確認", dashboard),
    ("滞留在庫の解消", stagnant_stock),
    ("導入効果", quantitative_effect),
    ("まとめとNext Steps", summary),
];

/// Build the full deck.
pub fn build(deck: &mut Deck) -> Result<()> {
    for (_, builder) in SLIDES {
        builder(deck)?;
    }
    Ok(())
}

fn title(deck: &mut Deck) -> Result<()> {
    deck.add_title_slide(
        "Warehouseシステム構築提案",
        "倉庫業務の可視化による滞留在庫の解消と\nPush型オペレーションの実現",
        "2026.01.XX",
    )?;
    Ok(())
}

/// Slide 2: why the system is needed, for management and for the floor.
fn purpose(deck: &mut Deck) -> Result<()> {
    let c = deck.palette();
    let area = deck.content_area();
    let slide = deck.add_content_slide("なぜWarehouseシステムが必要か")?;

    // Two columns (management | operations) with a center connector.
    let col_width = 7.0;
    let gap = 2.5;
    let total_width = col_width * 2.0 + gap;
    let start_left = area.center_left(total_width);
    let start_top = MARGIN_TOP + 0.1;

    let mgmt_left = start_left;
    slide.add_rounded_box(
        Rect::new(mgmt_left, start_top, col_width, 0.8),
        c.dark_navy,
        "👔 管理側のメリット",
        24,
        c.white,
    );

    let mgmt_benefits = [
        ("在庫がリアルタイムで見える", "どこに何がいくつあるか、即座に把握"),
        ("滞留を自動検知", "90日動きがなければアラート"),
        ("どこからでも確認", "会議中・出張先からもアクセス可能"),
    ];

    let benefit_height = 1.5;
    let benefit_gap = 0.25;
    let mgmt_top = start_top + 1.0;

    for (i, (title, desc)) in mgmt_benefits.iter().enumerate() {
        let top = mgmt_top + i as f64 * (benefit_height + benefit_gap);
        slide.add_rounded_box(
            Rect::new(mgmt_left, top, col_width, benefit_height),
            c.light_gray,
            "",
            14,
            c.dark_navy,
        );
        slide.add_text_box(
            Rect::new(mgmt_left + 0.3, top + 0.2, col_width - 0.6, 0.5),
            title,
            18,
            c.dark_navy,
            true,
            Align::Left,
        );
        slide.add_text_box(
            Rect::new(mgmt_left + 0.3, top + 0.7, col_width - 0.6, 0.6),
            desc,
            14,
            c.dark_navy,
            false,
            Align::Left,
        );
    }

    let ops_left = start_left + col_width + gap;
    slide.add_rounded_box(
        Rect::new(ops_left, start_top, col_width, 0.8),
        c.gold,
        "🔧 現場側のメリット",
        24,
        c.white,
    );

    let ops_benefits = [
        ("スキャン1回で作業完了", "手書き・二重入力がゼロに"),
        ("何をすべきか明確", "システムが作業と場所を指示"),
        ("誰でも同じ品質", "ベテラン依存からの脱却"),
    ];

    let ops_top = start_top + 1.0;
    for (i, (title, desc)) in ops_benefits.iter().enumerate() {
        let top = ops_top + i as f64 * (benefit_height + benefit_gap);
        slide.add_rounded_box(
            Rect::new(ops_left, top, col_width, benefit_height),
            c.light_gray,
            "",
            14,
            c.dark_navy,
        );
        slide.add_text_box(
            Rect::new(ops_left + 0.3, top + 0.2, col_width - 0.6, 0.5),
            title,
            18,
            c.dark_navy,
            true,
            Align::Left,
        );
        slide.add_text_box(
            Rect::new(ops_left + 0.3, top + 0.7, col_width - 0.6, 0.6),
            desc,
            14,
            c.dark_navy,
            false,
            Align::Left,
        );
    }

    let center_x = start_left + col_width + gap / 2.0;
    let connector_top = start_top + 1.5;
    slide.add_text_box(
        Rect::new(center_x - 0.5, connector_top, 1.0, 3.0),
        "⟷",
        48,
        c.gold,
        true,
        Align::Center,
    );

    let msg_top = start_top + 5.8;
    slide.add_rounded_box(
        Rect::new(start_left, msg_top, total_width, 1.2),
        c.dark_navy,
        "",
        20,
        c.white,
    );
    slide.add_text_box(
        Rect::new(start_left, msg_top + 0.15, total_width, 0.5),
        "「見えない」から「見える」へ",
        28,
        c.gold,
        true,
        Align::Center,
    );
    slide.add_text_box(
        Rect::new(start_left, msg_top + 0.65, total_width, 0.5),
        "見えれば判断できる。判断できれば動かせる。",
        20,
        c.white,
        false,
        Align::Center,
    );

    Ok(())
}

/// Slide 3: today's five problems.
fn issues(deck: &mut Deck) -> Result<()> {
    let c = deck.palette();
    let area = deck.content_area();
    let slide = deck.add_content_slide("現状の課題")?;

    let issues = [
        ("見えない", "在庫状況が不明"),
        ("溜まる", "倉庫が満杯に"),
        ("判断できない", "データがない"),
        ("属人的", "担当者依存"),
        ("現場負荷", "手書き・二重入力"),
    ];

    let box_width = 3.0;
    let box_height = 2.8;
    let gap = 0.3;

    let total_width = box_width * 5.0 + gap * 4.0;
    let start_left = area.center_left(total_width);
    let start_top = MARGIN_TOP + 0.3;

    for (i, (title, desc)) in issues.iter().enumerate() {
        let left = start_left + i as f64 * (box_width + gap);
        slide.add_text_box(
            Rect::new(left, start_top, box_width, 0.5),
            "❌",
            32,
            c.burgundy,
            true,
            Align::Center,
        );
        slide.add_multiline_box(
            Rect::new(left, start_top + 0.5, box_width, box_height),
            c.dark_navy,
            title,
            desc,
            22,
            14,
            c.white,
        );
    }

    Ok(())
}

/// Slide 4: before/after of the proposed direction.
fn solution(deck: &mut Deck) -> Result<()> {
    let c = deck.palette();
    let area = deck.content_area();
    let slide = deck.add_content_slide("解決の方向性")?;

    let comparisons = [
        ("紙・スプレッドシート管理", "スキャン1回で自動記録"),
        ("倉庫に聞かないとわからない", "どこからでもリアルタイム把握"),
        ("滞留在庫に気づかない", "90日で自動アラート"),
        ("出荷指示がバラバラ", "システムで一元管理"),
        ("紙を見て探し回る", "システムが場所を指示"),
    ];

    let col_width = 6.5;
    let row_height = 1.0;
    let gap = 0.2;
    let arrow_width = 0.8;

    let total_width = col_width * 2.0 + arrow_width;
    let start_left = area.center_left(total_width);
    let start_top = MARGIN_TOP + 0.2;

    slide.add_rounded_box(
        Rect::new(start_left, start_top, col_width, 0.7),
        c.dark_navy,
        "Before（現状）",
        20,
        c.white,
    );
    slide.add_rounded_box(
        Rect::new(start_left + col_width + arrow_width, start_top, col_width, 0.7),
        c.gold,
        "After（システム導入後）",
        20,
        c.white,
    );

    for (i, (before, after)) in comparisons.iter().enumerate() {
        let top = start_top + 0.85 + i as f64 * (row_height + gap);
        slide.add_rounded_box(
            Rect::new(start_left, top, col_width, row_height),
            c.light_gray,
            before,
            16,
            c.dark_navy,
        );
        slide.add_text_box(
            Rect::new(start_left + col_width, top, arrow_width, row_height),
            "→",
            28,
            c.gold,
            true,
            Align::Center,
        );
        slide.add_rounded_box(
            Rect::new(start_left + col_width + arrow_width, top, col_width, row_height),
            c.beige,
            after,
            16,
            c.dark_navy,
        );
    }

    let key_top = start_top + 7.0;
    slide.add_text_box(
        Rect::new(start_left, key_top, total_width, 0.5),
        "全ての入出荷を記録し、止まっている作業を「残」として可視化する。",
        22,
        c.gold,
        true,
        Align::Center,
    );

    Ok(())
}

/// Slide 5: system image, dashboard vs. mobile over a shared core.
fn system_overview(deck: &mut Deck) -> Result<()> {
    let c = deck.palette();
    let area = deck.content_area();
    let slide = deck.add_content_slide("システム構成イメージ")?;

    let col_width = 7.0;
    let gap = 2.5;
    let start_left = area.center_left(col_width * 2.0 + gap);
    let start_top = MARGIN_TOP + 0.1;

    let mgmt_left = start_left;
    slide.add_rounded_box(
        Rect::new(mgmt_left, start_top, col_width, 0.8),
        c.dark_navy,
        "👔 管理側：ダッシュボード",
        22,
        c.white,
    );

    let mgmt_features = [
        ("📊 全体進捗の把握", "入荷・出荷・在庫状況を一覧"),
        ("🔔 アラート通知", "SLA超過・滞留在庫を自動検知"),
        ("📈 データ分析", "滞留傾向・作業効率をレポート"),
        ("✅ 判断・承認", "廃棄/売却の意思決定"),
    ];

    let feature_height = 1.2;
    let feature_gap = 0.2;
    let mgmt_top = start_top + 1.0;

    for (i, (title, desc)) in mgmt_features.iter().enumerate() {
        let top = mgmt_top + i as f64 * (feature_height + feature_gap);
        slide.add_rounded_box(
            Rect::new(mgmt_left, top, col_width, feature_height),
            c.light_gray,
            "",
            14,
            c.dark_navy,
        );
        slide.add_text_box(
            Rect::new(mgmt_left + 0.3, top + 0.15, col_width - 0.6, 0.5),
            title,
            16,
            c.dark_navy,
            true,
            Align::Left,
        );
        slide.add_text_box(
            Rect::new(mgmt_left + 0.3, top + 0.6, col_width - 0.6, 0.5),
            desc,
            13,
            c.dark_navy,
            false,
            Align::Left,
        );
    }

    let ops_left = start_left + col_width + gap;
    slide.add_rounded_box(
        Rect::new(ops_left, start_top, col_width, 0.8),
        c.gold,
        "🔧 現場側：モバイルアプリ",
        22,
        c.white,
    );

    let ops_features = [
        ("📋 今日の作業一覧", "やるべきタスクが自動表示"),
        ("📍 場所ナビ", "棚番号・ロケーションを指示"),
        ("📷 スキャン完了", "バーコード読取で作業記録"),
        ("✔️ 進捗自動更新", "完了したらリアルタイム反映"),
    ];

    let ops_top = start_top + 1.0;
    for (i, (title, desc)) in ops_features.iter().enumerate() {
        let top = ops_top + i as f64 * (feature_height + feature_gap);
        slide.add_rounded_box(
            Rect::new(ops_left, top, col_width, feature_height),
            c.light_gray,
            "",
            14,
            c.dark_navy,
        );
        slide.add_text_box(
            Rect::new(ops_left + 0.3, top + 0.15, col_width - 0.6, 0.5),
            title,
            16,
            c.dark_navy,
            true,
            Align::Left,
        );
        slide.add_text_box(
            Rect::new(ops_left + 0.3, top + 0.6, col_width - 0.6, 0.5),
            desc,
            13,
            c.dark_navy,
            false,
            Align::Left,
        );
    }

    // Center connector with the data-sync arrows.
    let center_x = start_left + col_width;
    let center_top = start_top + 1.5;
    slide.add_text_box(
        Rect::new(center_x, center_top + 0.5, gap, 0.5),
        "←→",
        28,
        c.gold,
        true,
        Align::Center,
    );
    slide.add_text_box(
        Rect::new(center_x, center_top + 1.5, gap, 0.8),
        "データ\n連携",
        14,
        c.dark_navy,
        true,
        Align::Center,
    );
    slide.add_text_box(
        Rect::new(center_x, center_top + 2.5, gap, 0.5),
        "←→",
        28,
        c.gold,
        true,
        Align::Center,
    );

    // Shared core functions along the bottom.
    let bottom_top = start_top + 6.0;
    let func_width = 5.0;
    let func_gap = 0.5;
    let total_func_width = func_width * 3.0 + func_gap * 2.0;
    let func_start_left = area.center_left(total_func_width);

    slide.add_text_box(
        Rect::new(func_start_left, bottom_top - 0.5, total_func_width, 0.4),
        "共通基盤：3つの管理機能",
        16,
        c.dark_navy,
        true,
        Align::Center,
    );

    let functions = ["📥 入荷管理", "📦 在庫管理", "📤 出荷管理"];
    for (i, label) in functions.iter().enumerate() {
        let left = func_start_left + i as f64 * (func_width + func_gap);
        slide.add_rounded_box(
            Rect::new(left, bottom_top, func_width, 1.0),
            c.dark_navy,
            label,
            14,
            c.white,
        );
    }

    Ok(())
}

/// Slide 6: floor-work efficiency.
fn efficiency(deck: &mut Deck) -> Result<()> {
    let c = deck.palette();
    let area = deck.content_area();
    let slide = deck.add_content_slide("現場の作業効率化")?;

    slide.add_text_box(
        Rect::new(area.left(), MARGIN_TOP - 0.3, area.width(), 0.4),
        "スキャン1回で完了、手書き不要",
        22,
        c.dark_navy,
        false,
        Align::Center,
    );

    let comparisons = [
        ("紙で商品を探す", "システムが場所を指示"),
        ("手書き→PC入力", "スキャン1回で完了"),
        ("進捗確認が必要", "リアルタイム共有"),
        ("ベテラン依存", "誰でも同品質"),
    ];

    let col_width = 6.5;
    let row_height = 1.0;
    let gap = 0.2;
    let arrow_width = 0.8;

    let total_width = col_width * 2.0 + arrow_width;
    let start_left = area.center_left(total_width);
    let start_top = MARGIN_TOP + 0.5;

    slide.add_rounded_box(
        Rect::new(start_left, start_top, col_width, 0.6),
        c.dark_navy,
        "Before",
        18,
        c.white,
    );
    slide.add_rounded_box(
        Rect::new(start_left + col_width + arrow_width, start_top, col_width, 0.6),
        c.gold,
        "After",
        18,
        c.white,
    );

    for (i, (before, after)) in comparisons.iter().enumerate() {
        let top = start_top + 0.75 + i as f64 * (row_height + gap);
        slide.add_rounded_box(
            Rect::new(start_left, top, col_width, row_height),
            c.light_gray,
            before,
            16,
            c.dark_navy,
        );
        slide.add_text_box(
            Rect::new(start_left + col_width, top, arrow_width, row_height),
            "→",
            28,
            c.gold,
            true,
            Align::Center,
        );
        slide.add_rounded_box(
            Rect::new(start_left + col_width + arrow_width, top, col_width, row_height),
            c.beige,
            after,
            16,
            c.dark_navy,
        );
    }

    let testimonials = ["探す時間が減った", "迷わない", "記録の手間ゼロ"];
    let test_top = start_top + 5.5;
    let test_width = 4.5;
    let test_gap = 0.4;
    let total_test_width = test_width * 3.0 + test_gap * 2.0;
    let test_start_left = area.center_left(total_test_width);

    slide.add_text_box(
        Rect::new(test_start_left, test_top - 0.5, total_test_width, 0.4),
        "現場の声（想定）:",
        18,
        c.dark_navy,
        true,
        Align::Left,
    );

    for (i, text) in testimonials.iter().enumerate() {
        let left = test_start_left + i as f64 * (test_width + test_gap);
        slide.add_rounded_box(
            Rect::new(left, test_top, test_width, 0.7),
            c.gold,
            text,
            16,
            c.white,
        );
    }

    Ok(())
}

/// Slide 7: status visible from anywhere.
fn dashboard(deck: &mut Deck) -> Result<()> {
    let c = deck.palette();
    let area = deck.content_area();
    let slide = deck.add_content_slide("どこからでも状況確認")?;

    slide.add_text_box(
        Rect::new(area.left(), MARGIN_TOP - 0.3, area.width(), 0.4),
        "どこからでもリアルタイムで把握",
        22,
        c.dark_navy,
        false,
        Align::Center,
    );

    let dash_width = 9.0;
    let dash_height = 5.0;
    let dash_left = area.left() + 0.5;
    let dash_top = MARGIN_TOP + 0.5;

    slide.add_rounded_box(
        Rect::new(dash_left, dash_top, dash_width, dash_height),
        c.light_gray,
        "",
        16,
        c.dark_navy,
    );
    slide.add_text_box(
        Rect::new(dash_left + 0.3, dash_top + 0.2, dash_width - 0.6, 0.5),
        "ダッシュボード",
        18,
        c.dark_navy,
        true,
        Align::Left,
    );

    let items = [
        ("入荷", "着荷待ち 23 → 検品中 12", c.dark_navy),
        ("出荷", "準備中 22 → 発送待ち 11", c.dark_navy),
        ("在庫", "良品 4,521 / 滞留 156", c.dark_navy),
        ("アラート", "SLA超過 4 / 滞留 156", c.burgundy),
    ];

    let item_top = dash_top + 0.8;
    for (i, (label, value, color)) in items.iter().enumerate() {
        let top = item_top + i as f64 * 1.0;
        slide.add_rounded_box(Rect::new(dash_left + 0.3, top, 1.8, 0.8), *color, label, 14, c.white);
        slide.add_text_box(
            Rect::new(dash_left + 2.3, top + 0.2, 6.5, 0.6),
            value,
            16,
            c.dark_navy,
            false,
            Align::Left,
        );
    }

    let use_left = dash_left + dash_width + 0.8;
    let use_width = 6.5;

    let uses = ["会議中に在庫確認", "出張先から出荷確認", "朝イチでアラート確認"];

    slide.add_text_box(
        Rect::new(use_left, dash_top, use_width, 0.5),
        "いつでも確認できる:",
        18,
        c.dark_navy,
        true,
        Align::Left,
    );

    for (i, text) in uses.iter().enumerate() {
        let top = dash_top + 0.6 + i as f64 * 1.2;
        slide.add_rounded_box(Rect::new(use_left, top, use_width, 1.0), c.gold, text, 16, c.white);
    }

    Ok(())
}

/// Slide 8: clearing stagnant stock.
fn stagnant_stock(deck: &mut Deck) -> Result<()> {
    let c = deck.palette();
    let area = deck.content_area();
    let slide = deck.add_content_slide("滞留在庫の解消")?;

    slide.add_text_box(
        Rect::new(area.left(), MARGIN_TOP - 0.3, area.width(), 0.4),
        "判断を先送りにできない仕組み",
        22,
        c.dark_navy,
        false,
        Align::Center,
    );

    let flow_width = 15.0;
    let start_left = area.center_left(flow_width);
    let start_top = MARGIN_TOP + 0.5;

    slide.add_text_box(
        Rect::new(start_left, start_top, flow_width, 0.4),
        "現状の問題:",
        18,
        c.burgundy,
        true,
        Align::Left,
    );

    let problem_items = ["在庫", "放置", "大量滞留", "倉庫パンク"];
    let item_width = 3.4;

    for (i, text) in problem_items.iter().enumerate() {
        let left = start_left + i as f64 * (item_width + 0.4);
        let color = if i < 3 { c.dark_navy } else { c.burgundy };
        slide.add_rounded_box(
            Rect::new(left, start_top + 0.5, item_width, 1.2),
            color,
            text,
            18,
            c.white,
        );
        if i < problem_items.len() - 1 {
            slide.add_text_box(
                Rect::new(left + item_width, start_top + 0.85, 0.4, 0.5),
                "→",
                24,
                c.dark_navy,
                true,
                Align::Center,
            );
        }
    }

    let sol_top = start_top + 2.2;
    slide.add_text_box(
        Rect::new(start_left, sol_top, flow_width, 0.4),
        "システム導入後:",
        18,
        c.gold,
        true,
        Align::Left,
    );

    let solution_items = [
        ("在庫", c.dark_navy),
        ("90日動きなし", c.dark_navy),
        ("自動フラグ", c.dark_navy),
        ("本部に通知", c.gold),
        ("3営業日で判断", c.gold),
        ("実行", c.gold),
    ];

    let sol_item_width = 2.4;
    for (i, (text, color)) in solution_items.iter().enumerate() {
        let left = start_left + i as f64 * (sol_item_width + 0.25);
        slide.add_rounded_box(
            Rect::new(left, sol_top + 0.5, sol_item_width, 1.4),
            *color,
            text,
            14,
            c.white,
        );
        if i < solution_items.len() - 1 {
            slide.add_text_box(
                Rect::new(left + sol_item_width, sol_top + 0.95, 0.25, 0.5),
                "→",
                18,
                c.dark_navy,
                true,
                Align::Center,
            );
        }
    }

    let key_top = sol_top + 2.3;
    slide.add_text_box(
        Rect::new(start_left, key_top, flow_width, 0.5),
        "期限付きの「残」として管理することで、滞留を強制的に解消。",
        20,
        c.gold,
        true,
        Align::Center,
    );

    Ok(())
}

/// Slide 9: quantitative effect, two metric tables plus the ROI row.
fn quantitative_effect(deck: &mut Deck) -> Result<()> {
    let c = deck.palette();
    let area = deck.content_area();
    let slide = deck.add_content_slide("導入効果（定量）")?;

    let left_start = area.left() + 0.3;
    let left_width = 8.0;
    let start_top = MARGIN_TOP + 0.1;

    slide.add_text_box(
        Rect::new(left_start, start_top, left_width, 0.4),
        "業務効率の改善",
        18,
        c.dark_navy,
        true,
        Align::Left,
    );

    let efficiency_data = [
        ["指標", "現状", "導入後", "改善幅"],
        ["在庫精度", "xx%", "99%以上", "+xx%"],
        ["在庫確認時間", "xx分/回", "即時(<1分)", "-xx%"],
        ["入出荷作業時間", "xx分/件", "xx分/件", "-30%想定"],
        ["記録・入力作業", "xx時間/日", "ほぼゼロ", "-90%想定"],
        ["問い合わせ対応", "xx件/日", "xx件/日", "-50%想定"],
    ];

    let eff_col_widths = [2.0, 1.6, 1.8, 1.4];
    let eff_row_height = 0.55;
    let eff_gap = 0.08;
    let eff_top = start_top + 0.5;

    for (row_idx, row) in efficiency_data.iter().enumerate() {
        let top = eff_top + row_idx as f64 * (eff_row_height + eff_gap);
        let mut col_left = left_start;
        for (col_idx, cell) in row.iter().enumerate() {
            let (color, font_color) = if row_idx == 0 {
                (if col_idx < 2 { c.dark_navy } else { c.gold }, c.white)
            } else {
                (c.light_gray, c.dark_navy)
            };
            slide.add_rounded_box(
                Rect::new(col_left, top, eff_col_widths[col_idx], eff_row_height),
                color,
                cell,
                12,
                font_color,
            );
            col_left += eff_col_widths[col_idx] + eff_gap;
        }
    }

    let right_start = left_start + left_width + 0.5;
    let right_width = 7.5;

    slide.add_text_box(
        Rect::new(right_start, start_top, right_width, 0.4),
        "コストインパクト",
        18,
        c.dark_navy,
        true,
        Align::Left,
    );

    let cost_data = [
        ["項目", "現状(年)", "導入後(年)", "削減効果"],
        ["滞留在庫金額", "$xx万", "$xx万", "$xx万削減"],
        ["廃棄ロス", "$xx万", "$xx万", "$xx万削減"],
        ["人件費(記録)", "$xx万", "$xx万", "$xx万削減"],
        ["合計削減効果", "-", "-", "$xx万/年"],
    ];

    let cost_col_widths = [1.8, 1.5, 1.5, 1.6];
    let cost_row_height = 0.55;
    let cost_gap = 0.08;
    let cost_top = start_top + 0.5;

    for (row_idx, row) in cost_data.iter().enumerate() {
        let top = cost_top + row_idx as f64 * (cost_row_height + cost_gap);
        let mut col_left = right_start;
        for (col_idx, cell) in row.iter().enumerate() {
            let (color, font_color) = if row_idx == 0 {
                (if col_idx < 2 { c.dark_navy } else { c.gold }, c.white)
            } else if row_idx == cost_data.len() - 1 {
                if col_idx == 3 {
                    (c.gold, c.white)
                } else {
                    (c.light_gray, c.dark_navy)
                }
            } else {
                (c.light_gray, c.dark_navy)
            };
            slide.add_rounded_box(
                Rect::new(col_left, top, cost_col_widths[col_idx], cost_row_height),
                color,
                cell,
                12,
                font_color,
            );
            col_left += cost_col_widths[col_idx] + cost_gap;
        }
    }

    let roi_top = start_top + 4.2;
    let roi_width = 16.0;
    let roi_left = area.center_left(roi_width);

    slide.add_text_box(
        Rect::new(roi_left, roi_top, roi_width, 0.4),
        "ROI試算",
        18,
        c.dark_navy,
        true,
        Align::Left,
    );

    let roi_items = [
        ("初期投資", "$xx万", c.dark_navy),
        ("年間運用コスト", "$xx万", c.dark_navy),
        ("年間削減効果", "$xx万", c.gold),
        ("投資回収期間", "xx年", c.gold),
    ];

    let roi_item_width = 3.6;
    let roi_gap = 0.4;
    let roi_box_top = roi_top + 0.5;

    for (i, (label, value, color)) in roi_items.iter().enumerate() {
        let left = roi_left + i as f64 * (roi_item_width + roi_gap);
        slide.add_rounded_box(
            Rect::new(left, roi_box_top, roi_item_width, 0.9),
            *color,
            &format!("{}\n{}", label, value),
            14,
            c.white,
        );
    }

    let goal_top = roi_box_top + 1.2;
    slide.add_text_box(
        Rect::new(roi_left, goal_top, roi_width, 0.5),
        "最終ゴール: Pull型（現場任せ）からPush型（本部主導）へ",
        18,
        c.gold,
        true,
        Align::Center,
    );

    Ok(())
}

/// Slide 10: summary and next steps.
fn summary(deck: &mut Deck) -> Result<()> {
    let c = deck.palette();
    let area = deck.content_area();
    let slide = deck.add_content_slide("まとめとNext Steps")?;

    let col_width = 5.0;
    let gap = 0.4;
    let total_width = col_width * 3.0 + gap * 2.0;
    let start_left = area.center_left(total_width);
    let start_top = MARGIN_TOP + 0.1;

    slide.add_rounded_box(
        Rect::new(start_left, start_top, col_width, 0.6),
        c.dark_navy,
        "1. 課題",
        20,
        c.white,
    );
    slide.add_rounded_box(
        Rect::new(start_left, start_top + 0.7, col_width, 2.8),
        c.light_gray,
        "・在庫が見えない\n・溜まる\n・判断できない\n・属人的\n・現場負荷が高い",
        16,
        c.dark_navy,
    );

    let col2_left = start_left + col_width + gap;
    slide.add_rounded_box(
        Rect::new(col2_left, start_top, col_width, 0.6),
        c.dark_navy,
        "2. 解決策",
        20,
        c.white,
    );
    slide.add_rounded_box(
        Rect::new(col2_left, start_top + 0.7, col_width, 2.8),
        c.light_gray,
        "・入出荷をシステム記録\n・「残」として可視化\n・スキャン1回で完了",
        16,
        c.dark_navy,
    );

    let col3_left = col2_left + col_width + gap;
    slide.add_rounded_box(
        Rect::new(col3_left, start_top, col_width, 0.6),
        c.gold,
        "3. 期待効果",
        20,
        c.white,
    );
    slide.add_rounded_box(
        Rect::new(col3_left, start_top + 0.7, col_width, 2.8),
        c.light_gray,
        "・在庫リアルタイム把握\n・現場作業の効率化\n・滞留の自動検知\n・Push型オペレーション",
        16,
        c.dark_navy,
    );

    let next_top = start_top + 4.0;
    slide.add_text_box(
        Rect::new(start_left, next_top, total_width, 0.5),
        "Next Steps:",
        22,
        c.dark_navy,
        true,
        Align::Left,
    );

    let steps = [
        ("1", "本提案の方向性承認"),
        ("2", "詳細設計（画面・データ項目）"),
        ("3", "Phase 1 開発着手"),
    ];
    let step_width = 5.0;
    let step_gap = 0.3;
    let step_top = next_top + 0.6;

    for (i, (num, text)) in steps.iter().enumerate() {
        let left = start_left + i as f64 * (step_width + step_gap);
        slide.add_rounded_box(Rect::new(left, step_top, 0.6, 0.6), c.gold, num, 18, c.white);
        slide.add_text_box(
            Rect::new(left + 0.7, step_top + 0.1, step_width - 0.8, 0.5),
            text,
            18,
            c.dark_navy,
            false,
            Align::Left,
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deck_has_ten_slides_in_order() {
        assert_eq!(SLIDES.len(), 10);
        assert_eq!(SLIDES[0].0, "Title");
        assert_eq!(SLIDES[9].0, "まとめとNext Steps");
    }
}
