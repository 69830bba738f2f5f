use console::{Style, StyledObject};

use crate::types::{CheckLine, CheckOutcome, HomePageResult, LikesResult, OverallResult};

const SERVER_DOWN_HINT: &str = "Start the app locally and make sure it listens on the base URL";
const SERVER_ERROR_HINT: &str = "The home page did not answer HTTP 200; check the server logs";
const IMAGES_HINT: &str = "Check that public/images/ contains rezide-logo.png and presentation.jpg";
const LIKE_HINT: &str = "Check that the post renders its Like button";
const SHARE_HINT: &str = "Check that the post renders its Share button";
const CONTENT_HINT: &str = "Check that the post includes the Rezide description";
const LIKES_HINT: &str =
    "Check that /api/likes accepts POST and GET and answers with JSON like {\"likes\": 1}";

const NEXT_STEPS: &[&str] = &[
    "Add your images to public/images/ folder",
    "Upload to GitHub: git init && git add . && git commit -m \"Initial commit\"",
    "Deploy to Vercel: vercel --prod",
    "Test the deployed URL",
];

fn status_tag(passed: bool) -> StyledObject<&'static str> {
    if passed {
        Style::new().green().bold().apply_to("PASS")
    } else {
        Style::new().red().bold().apply_to("FAIL")
    }
}

fn print_line(line: &CheckLine) {
    println!("  {} {}: {}", status_tag(line.passed), line.name, line.detail);
    if let Some(hint) = line.fix_hint.filter(|_| !line.passed) {
        println!("       hint: {hint}");
    }
}

pub fn print_header(base_url: &str) {
    println!("Testing Rezide LinkedIn Post app at {base_url}");
    println!();
    println!("Home page:");
}

pub fn print_api_header() {
    println!();
    println!("API endpoints:");
}

/// Text shown for the home page server line.
pub fn server_detail(home: &HomePageResult) -> String {
    match home.outcome {
        CheckOutcome::ConnectionFailed => "not running".to_string(),
        _ if home.status == 200 => "running (HTTP 200)".to_string(),
        _ => format!("error (HTTP {})", home.status),
    }
}

fn presence(found: bool, yes: &str) -> String {
    if found { yes.to_string() } else { "missing".to_string() }
}

fn line(name: &str, passed: bool, detail: String, fix_hint: &'static str) -> CheckLine {
    CheckLine {
        name: name.to_string(),
        passed,
        detail,
        fix_hint: Some(fix_hint),
    }
}

/// Report lines for the home page. When the server could not be reached only
/// the server line carries a hint; the page predicates were never evaluated.
pub fn home_page_lines(home: &HomePageResult) -> Vec<CheckLine> {
    let reached = home.outcome != CheckOutcome::ConnectionFailed;
    let server_hint = if reached { SERVER_ERROR_HINT } else { SERVER_DOWN_HINT };
    let mut lines = vec![
        line("server", home.status == 200, server_detail(home), server_hint),
        line("images", home.has_images, presence(home.has_images, "loaded"), IMAGES_HINT),
        line("like button", home.has_like_button, presence(home.has_like_button, "present"), LIKE_HINT),
        line("share button", home.has_share_button, presence(home.has_share_button, "present"), SHARE_HINT),
        line("content", home.has_rezide_content, presence(home.has_rezide_content, "present"), CONTENT_HINT),
    ];
    if !reached {
        for l in lines.iter_mut().skip(1) {
            l.fix_hint = None;
        }
    }
    lines
}

pub fn print_home_page(home: &HomePageResult) {
    for l in home_page_lines(home) {
        print_line(&l);
    }
}

/// Text shown for a likes endpoint line.
pub fn likes_detail(result: &LikesResult) -> String {
    match result.outcome {
        CheckOutcome::ConnectionFailed => "connection failed".to_string(),
        CheckOutcome::InvalidResponse => format!("invalid response (HTTP {})", result.status),
        CheckOutcome::Responded if result.status != 200 => {
            format!("error (HTTP {})", result.status)
        }
        CheckOutcome::Responded if result.likes_reported => format!("likes: {}", result.likes),
        CheckOutcome::Responded => "likes: unknown".to_string(),
    }
}

pub fn likes_line(result: &LikesResult) -> CheckLine {
    let hint = match result.outcome {
        CheckOutcome::ConnectionFailed => SERVER_DOWN_HINT,
        _ => LIKES_HINT,
    };
    line(&result.endpoint, result.is_ok(), likes_detail(result), hint)
}

pub fn print_likes(result: &LikesResult) {
    print_line(&likes_line(result));
}

pub fn print_summary(overall: &OverallResult) {
    let green = Style::new().green().bold();
    let red = Style::new().red().bold();
    let yellow = Style::new().yellow().bold();

    println!();
    println!("Test Results:");
    println!("{}", "=".repeat(60));
    if overall.passed {
        println!("Overall Status: {}", green.apply_to("ALL TESTS PASSED"));
    } else {
        println!("Overall Status: {}", red.apply_to("SOME TESTS FAILED"));
    }
    println!("{}", "=".repeat(60));
    println!();

    if overall.passed {
        println!("Your Rezide LinkedIn Post app is ready!");
        println!();
        println!("Next steps:");
        for (i, step) in NEXT_STEPS.iter().enumerate() {
            println!("   {}. {}", i + 1, step);
        }
        println!();
        println!("Your app will work on both localhost and Vercel.");
    } else {
        println!("{}", yellow.apply_to("Please fix the issues above before deploying."));
    }
}
