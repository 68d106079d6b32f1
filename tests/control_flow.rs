#[macro_use]
mod cases;

use indoc::indoc;

test_case!(
    if_else,
    input: "set x = 5\nif x > 3 {\nprint \"big\"\n} else {\nprint \"small\"\n}",
    output: "big\n",
    js: "let x = 5;\nif (x > 3) {\nconsole.log(\"big\");\n}\nelse {\nconsole.log(\"small\");\n}",
);

test_case!(
    else_on_its_own_line,
    input: indoc! {r#"
        set score = 75
        if score >= 90 {
            print "A"
        }
        else if score >= 70 {
            print "C"
        }
        otherwise {
            print "F"
        }
    "#},
    output: "C\n",
    js: indoc! {r#"
        let score = 75;
        if (score >= 90) {
        console.log("A");
        }
        else if (score >= 70) {
        console.log("C");
        }
        else {
        console.log("F");
        }"#},
);

test_case!(
    first_true_branch_wins,
    input: indoc! {r#"
        set x = 50
        if x > 10 {
            print "over 10"
        } else if x > 20 {
            print "over 20"
        }
    "#},
    output: "over 10\n",
);

test_case!(
    boolean_logic,
    input: indoc! {r#"
        set raining = false
        set cold = true
        if not raining and cold {
            print "coat"
        }
        if raining or cold == false {
            print "umbrella"
        }
    "#},
    output: "coat\n",
    js: indoc! {r#"
        let raining = false;
        let cold = true;
        if (!raining && cold) {
        console.log("coat");
        }
        if (raining || cold === false) {
        console.log("umbrella");
        }"#},
);

test_case!(
    repeat_times,
    input: "repeat 3 times {\nprint \"x\"\n}",
    output: "x\nx\nx\n",
    js: "for (let _i0 = 0, _n0 = 3; _i0 < _n0; _i0++) {\nconsole.log(\"x\");\n}",
);

test_case!(
    repeat_zero,
    input: "repeat 0 {\nprint \"x\"\n}",
    output: "",
);

test_case!(
    repeat_shares_environment,
    input: "repeat 3 {\nadd 1 and 1 into t\n}\nprint t",
    output: "2\n",
    js: indoc! {r#"
        let t;
        for (let _i0 = 0, _n0 = 3; _i0 < _n0; _i0++) {
        t = 1 + 1;
        }
        console.log(t);"#},
);

test_case!(
    countdown,
    input: indoc! {r#"
        set n = 3
        repeat n times {
            print n
            add n and -1 into n
        }
    "#},
    output: "3\n2\n1\n",
    js: indoc! {r#"
        let n = 3;
        for (let _i0 = 0, _n0 = n; _i0 < _n0; _i0++) {
        console.log(n);
        n = n + -1;
        }"#},
);

test_case!(
    nested_blocks,
    input: indoc! {r#"
        repeat 2 {
            repeat 2 {
                if true {
                    print "hi"
                }
            }
        }
    "#},
    output: "hi\nhi\nhi\nhi\n",
);

test_case!(
    invalid_repeat_count,
    input: "repeat 2.5 {\nprint 1\n}",
    output: "Error (line 1): Repeat needs a whole number of times (0 or more), not '2.5'\n",
);

test_case!(
    condition_must_be_true_or_false,
    input: "if 1 {\nprint 1\n}",
    output: "Error (line 1): The condition '1' must be true or false, not Integer\n",
);

test_case!(
    unterminated_block,
    input: "print 1\nrepeat 3 {\nprint 2",
    output: "Error (line 2): This block is never closed with '}'\n",
);
