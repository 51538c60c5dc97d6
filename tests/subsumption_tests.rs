use alcq_reasoner::{
    parse_abox, parse_premise, parse_tbox, premise_subsumes, Abox, DlError, TBox,
};

fn holds(tbox: &TBox, premise: &str) -> bool {
    let premise = parse_premise(premise).unwrap();
    let (explored, subsumed) = premise_subsumes(&Abox::new(), tbox, &premise).unwrap();
    assert!(!explored.is_empty());
    subsumed
}

#[test]
fn test_good_student_subsumption() {
    let tbox = parse_tbox("GoodStudent == (or Smart Studious)").unwrap();
    assert!(holds(
        &tbox,
        "(subsumes (exists attendedBy (and Smart Studious)) (exists attendedBy GoodStudent))",
    ));
}

#[test]
fn test_conjunct_is_subsumed() {
    let tbox = TBox::new();
    assert!(holds(&tbox, "(subsumes (and A B) A)"));
    assert!(!holds(&tbox, "(subsumes A (and A B))"));
}

#[test]
fn test_atomic_concepts_do_not_subsume_each_other() {
    let tbox = TBox::new();
    assert!(!holds(&tbox, "(subsumes A B)"));
}

#[test]
fn test_nested_quantifier_subsumption() {
    let tbox = TBox::new();
    assert!(holds(
        &tbox,
        "(subsumes (and (all r (all s A)) (exists r (all s B)) (all r (exists s C))) \
                   (exists r (exists s (and A B C))))",
    ));
}

#[test]
fn test_branching_subsumption() {
    let tbox = TBox::new();
    assert!(holds(
        &tbox,
        "(subsumes (and (all r (all s A)) (or (exists r (all s (not A))) (all r (exists s B)))) \
                   (or (all r (exists s (and A B))) (exists r (all s (not B)))))",
    ));
}

#[test]
fn test_subsumption_uses_the_abox_context() {
    // With no constraining assertions the premise fails, and extra
    // assertions about unrelated individuals do not change the verdict
    let tbox = parse_tbox("GoodStudent == (or Smart Studious)").unwrap();
    let abox = parse_abox("Smart[ann]").unwrap();
    let premise = parse_premise("(subsumes GoodStudent Smart)").unwrap();

    let (explored, subsumed) = premise_subsumes(&abox, &tbox, &premise).unwrap();
    assert!(!subsumed);
    // the found countermodel still carries the context assertion
    assert!(explored
        .iter()
        .any(|state| state.contains_all(&abox)));
}

#[test]
fn test_quantifier_duality_subsumption() {
    let tbox = TBox::new();
    // (not (exists r A)) and (all r (not A)) are equivalent
    assert!(holds(&tbox, "(subsumes (not (exists r A)) (all r (not A)))"));
    assert!(holds(&tbox, "(subsumes (all r (not A)) (not (exists r A)))"));
}

#[test]
fn test_number_restriction_subsumption() {
    let tbox = TBox::new();
    // three distinguished successors certainly give two
    assert!(holds(
        &tbox,
        "(subsumes (>= 3 (rule r C)) (>= 2 (rule r C)))",
    ));
    assert!(!holds(
        &tbox,
        "(subsumes (>= 2 (rule r C)) (>= 3 (rule r C)))",
    ));
    // an exists is an at-least-one
    assert!(holds(
        &tbox,
        "(subsumes (exists r C) (>= 1 (rule r C)))",
    ));
}

#[test]
fn test_nested_subsumes_is_malformed() {
    let err = parse_premise("(subsumes A (subsumes B C))").unwrap_err();
    assert!(matches!(err, DlError::MalformedExpression(_)));
}
