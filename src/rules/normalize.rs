/// Strip one pair of matching quotes (`"` or `'`) that wrap an entire line.
///
/// Each line is handled on its own, so a multi-line value keeps its line
/// structure and only the lines that are fully quoted lose their quotes.
/// Line terminators (`\n` or `\r\n`) are preserved.
///
/// Only one layer is removed per call. The function is idempotent except on
/// lines wrapped in two or more layers of quotes: `"'abc'"` becomes `'abc'`,
/// and a second call turns that into `abc`.
pub fn clean_quotes(text: &str) -> String {
	let mut out = String::with_capacity(text.len());

	for line in text.split_inclusive('\n') {
		let (body, terminator) = split_terminator(line);
		out.push_str(unquote_line(body));
		out.push_str(terminator);
	}

	out
}

fn split_terminator(line: &str) -> (&str, &str) {
	if let Some(body) = line.strip_suffix("\r\n") {
		(body, "\r\n")
	} else if let Some(body) = line.strip_suffix('\n') {
		(body, "\n")
	} else {
		(line, "")
	}
}

fn unquote_line(line: &str) -> &str {
	for quote in ['"', '\''] {
		if line.len() >= 2
			&& let Some(inner) = line
				.strip_prefix(quote)
				.and_then(|rest| rest.strip_suffix(quote))
		{
			return inner;
		}
	}
	line
}
