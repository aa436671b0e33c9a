// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
#[allow(dead_code)]
pub fn generate_page(sections: usize) -> String {
    let mut page = String::from("{/* Generated landing page */}\n");

    for section in 0..sections {
        page.push_str(&format!(
            r#"<motion.section className="section-{section}" initial={{{{ opacity: 0 }}}}>
  <h2 className="title">Section {section}</h2>
  <p>Plain copy with <Link to="/contact">a link</Link> and {{"a literal"}}.</p>
  <ul>
    {{items.map((item) => <li key={{item.id}}>{{item.name}}</li>)}}
  </ul>
</motion.section>
"#
        ));
        if section % 4 == 0 {
            page.push_str("<Testimonials />\n");
        }
    }

    page
}

#[allow(dead_code)]
pub fn generate_preamble_page(sections: usize) -> String {
    format!("home CodeSave Changes </> {}", generate_page(sections))
}
