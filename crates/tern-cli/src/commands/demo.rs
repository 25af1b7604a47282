use miette::Result;
use tern_parser::ParserOptions;

use super::Source;

const DEMO_SOURCE: &str = r#"class Counter extends Base {
  #count = 0;
  static label = "counter";

  constructor(start = 0) {
    this.#count = start;
  }

  *values(limit) {
    for (let i = 0; i < limit; i++) {
      yield this.#count + i;
    }
  }

  async fetch(url) {
    try {
      const response = await load(url);
      return response?.body ?? `empty ${url}`;
    } catch (e) {
      throw new Error(e);
    }
  }
}

const double = (x) => x * 2;
for (const n of [1, 2, 3]) {
  console.log(double(n) ** 2, /ab+c/gi);
}
"#;

/// Parse a built-in snippet and print its AST.
pub fn run() -> Result<()> {
    let source = Source {
        name: "<demo>".to_string(),
        text: DEMO_SOURCE.to_string(),
    };
    super::parse::run(&source, ParserOptions::default(), false)
}
